//! Hitbox lifecycle: delayed activation, animation signals, timer retirement.
//!
//! Активация - только через deferred action и только пока владелец в
//! Attacking. Деактивация разрешена всегда и идемпотентна.

use bevy::prelude::*;

use crate::combat::components::{Combatant, HitboxId};
use crate::combat::events::{AnimationSignal, HitboxToggled};
use crate::schedule::{Scheduler, SimClock};

/// Queue activation of `hitbox` on `entity` after `delay`.
pub fn schedule_hitbox_activation(scheduler: &mut Scheduler, entity: Entity, hitbox: HitboxId, delay: f32) {
    scheduler.after(delay, move |world: &mut World| {
        activate_hitbox_now(world, entity, hitbox);
    });
}

/// Deferred callback body: enable the hitbox if the owner still exists and is
/// still attacking. Stale requests are dropped.
pub fn activate_hitbox_now(world: &mut World, entity: Entity, hitbox: HitboxId) -> bool {
    let now = world.resource::<SimClock>().now();
    let Some(mut combatant) = world.get_mut::<Combatant>(entity) else {
        return false;
    };

    if !combatant.activate_hitbox(now, hitbox) {
        crate::logger::log(&format!("⏳ Hitbox {:?} on {:?}: stale activation dropped", hitbox, entity));
        return false;
    }

    world.send_event(HitboxToggled {
        entity,
        hitbox,
        active: true,
    });
    crate::logger::log(&format!("🟥 Hitbox {:?} ON ({:?})", hitbox, entity));
    true
}

/// Система: animation driver signals.
///
/// `StateEntered` (re)opens the attack window when authored to and schedules
/// the hitbox after `attack_delay`; `StateExited` is the deactivation backstop.
pub fn consume_animation_signals(
    mut signals: EventReader<AnimationSignal>,
    mut scheduler: Scheduler,
    mut combatants: Query<&mut Combatant>,
    mut toggles: EventWriter<HitboxToggled>,
) {
    let now = scheduler.now();

    for signal in signals.read() {
        match *signal {
            AnimationSignal::StateEntered {
                entity,
                hitbox,
                attack_delay,
                timeout,
                opens_window,
            } => {
                let Ok(mut combatant) = combatants.get_mut(entity) else {
                    continue;
                };
                // Сигнал от прерванной анимации (смерть/оглушение)
                if combatant.is_dead || combatant.is_stunned(now) {
                    continue;
                }

                if opens_window {
                    combatant.attack_window.open(now, timeout);
                }
                if let Some(hitbox) = hitbox {
                    schedule_hitbox_activation(&mut scheduler, entity, hitbox, attack_delay);
                }
            }
            AnimationSignal::StateExited { entity, hitbox } => {
                let Some(hitbox) = hitbox else {
                    continue;
                };
                let Ok(mut combatant) = combatants.get_mut(entity) else {
                    continue;
                };
                if combatant.deactivate_hitbox(hitbox) {
                    toggles.write(HitboxToggled {
                        entity,
                        hitbox,
                        active: false,
                    });
                    crate::logger::log(&format!("⬜ Hitbox {:?} OFF on state exit ({:?})", hitbox, entity));
                }
            }
        }
    }
}

/// Система: attack window expired → hitboxes still on are switched off.
pub fn retire_expired_attacks(
    clock: Res<SimClock>,
    mut combatants: Query<(Entity, &mut Combatant)>,
    mut toggles: EventWriter<HitboxToggled>,
) {
    let now = clock.now();

    for (entity, mut combatant) in combatants.iter_mut() {
        if combatant.active_hitboxes().is_empty() || combatant.is_attacking(now) {
            continue;
        }
        for hitbox in combatant.clear_hitboxes() {
            toggles.write(HitboxToggled {
                entity,
                hitbox,
                active: false,
            });
            crate::logger::log(&format!("⬜ Hitbox {:?} OFF, attack over ({:?})", hitbox, entity));
        }
    }
}

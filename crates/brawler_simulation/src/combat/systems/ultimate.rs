//! Ultimate (finishing move) execution.
//!
//! Единственный путь к Dead. После каждого ultimate через фиксированную
//! задержку планируется проверка завершения encounter.

use bevy::prelude::*;

use crate::combat::components::{AttackKind, Combatant, EnergyMeter};
use crate::combat::encounter::{run_completion_check, EncounterState};
use crate::combat::events::{
    AnimationCue, AnimationRequest, EnergyChanged, FinisherExecuted, HitboxToggled, PlaybackMode,
    PostDeathReaction,
};
use crate::combat::targeting::UltimateTarget;
use crate::components::{AttackIntent, Enemy, Locomotion, Player};
use crate::config::CombatConfig;
use crate::schedule::Scheduler;

use super::hits::energy_changed;

/// Number of finishers performed so far (even → variant 0, odd → variant 1).
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FinisherCount(pub usize);

impl FinisherCount {
    pub fn next_variant(self) -> usize {
        self.0 % 2
    }
}

fn finisher_cues(variant: usize) -> (AnimationCue, AnimationCue) {
    if variant == 0 {
        (AnimationCue::SpecialAttack01, AnimationCue::GetSpecialAttack01)
    } else {
        (AnimationCue::SpecialAttack02, AnimationCue::GetSpecialAttack02)
    }
}

/// Rotate `transform` to face `point` on its own height. No-op when the
/// points coincide on the ground plane.
fn face_flat(transform: &mut Transform, point: Vec3) {
    let mut look_at = point;
    look_at.y = transform.translation.y;
    if (look_at - transform.translation).length_squared() > f32::EPSILON {
        transform.look_at(look_at, Vec3::Y);
    }
}

/// Система: execute ultimate on the current target.
///
/// Отказ (intent всё равно сброшен, meter не тронут):
/// - encounter завершён, игрок Attacking/Stunned
/// - meter не полный, нет цели, цель уже мертва
#[allow(clippy::too_many_arguments)]
pub fn execute_ultimate(
    mut scheduler: Scheduler,
    config: Res<CombatConfig>,
    encounter: Res<EncounterState>,
    mut target: ResMut<UltimateTarget>,
    mut count: ResMut<FinisherCount>,
    mut players: Query<
        (Entity, &mut Transform, &mut Combatant, &mut EnergyMeter, &mut AttackIntent),
        With<Player>,
    >,
    mut enemies: Query<(&mut Transform, &mut Combatant, &mut Locomotion, &mut Enemy), Without<Player>>,
    mut events: (
        EventWriter<AnimationRequest>,
        EventWriter<HitboxToggled>,
        EventWriter<EnergyChanged>,
        EventWriter<FinisherExecuted>,
    ),
) {
    let Ok((player, mut player_transform, mut player_combatant, mut meter, mut intent)) = players.single_mut()
    else {
        return;
    };
    if !intent.special_attack_requested {
        return;
    }
    intent.special_attack_requested = false;

    let now = scheduler.now();
    if encounter.is_finished() || player_combatant.is_busy(now) {
        crate::logger::log(&format!("✋ Ultimate ignored ({:?})", player_combatant.state(now)));
        return;
    }
    if !meter.is_full() {
        crate::logger::log(&format!("🔋 Ultimate refused: energy {:.1}/{:.1}", meter.value(), meter.max()));
        return;
    }
    let Some(victim) = target.current else {
        crate::logger::log("🔋 Ultimate refused: no target in range");
        return;
    };
    let Ok((mut victim_transform, mut victim_combatant, mut locomotion, mut enemy)) = enemies.get_mut(victim) else {
        crate::logger::log_warning(&format!("⚠️ Ultimate target {:?} is no longer an enemy combatant", victim));
        target.current = None;
        return;
    };
    if victim_combatant.is_dead {
        return;
    }

    let (animations, toggles, energy, finishers) = &mut events;

    meter.spend();
    energy.write(energy_changed(player, &meter));

    let variant = count.next_variant();
    count.0 += 1;
    let (attacker_cue, victim_cue) = finisher_cues(variant);

    // Attacker: face the target, busy for the finisher
    face_flat(&mut player_transform, victim_transform.translation);
    player_combatant.begin_attack(now, config.ultimate.busy_duration, AttackKind::Special);

    // Victim: staged in front of the attacker, facing it
    if let Some(cleared) = victim_combatant.kill(now) {
        for hitbox in cleared {
            toggles.write(HitboxToggled {
                entity: victim,
                hitbox,
                active: false,
            });
        }
    }
    let forward = *player_transform.forward();
    victim_transform.translation = player_transform.translation + forward * config.ultimate.reposition_offset;
    face_flat(&mut victim_transform, player_transform.translation);
    locomotion.halt();
    enemy.highlighted = false;
    target.current = None;

    animations.write(AnimationRequest {
        entity: victim,
        cue: victim_cue,
        mode: PlaybackMode::Restart,
    });
    animations.write(AnimationRequest {
        entity: player,
        cue: attacker_cue,
        mode: PlaybackMode::Play,
    });
    finishers.write(FinisherExecuted {
        attacker: player,
        target: victim,
        variant,
    });

    let reaction_delay = config.ultimate.reaction_delays[variant];
    scheduler.after(reaction_delay, move |world: &mut World| {
        if world.get::<Combatant>(victim).is_none() {
            return;
        }
        world.send_event(PostDeathReaction {
            entity: victim,
            variant,
        });
        crate::logger::log(&format!("🪦 Post-death reaction for {:?} (variant {})", victim, variant));
    });
    scheduler.after(config.ultimate.completion_check_delay, |world: &mut World| {
        run_completion_check(world);
    });

    crate::logger::log_info(&format!("🌀 Ultimate variant {} finishes {:?}", variant, victim));
}

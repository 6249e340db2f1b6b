//! Hit resolution: overlap events from physics → stun transitions.

use bevy::prelude::*;

use crate::combat::components::{CombatRole, Combatant, EnergyMeter};
use crate::combat::events::{
    AnimationCue, AnimationRequest, CombatantStunned, EnergyChanged, HitboxOverlap, HitboxToggled, PlaybackMode,
};
use crate::config::CombatConfig;
use crate::schedule::SimClock;

pub(crate) fn energy_changed(entity: Entity, meter: &EnergyMeter) -> EnergyChanged {
    EnergyChanged {
        entity,
        value: meter.value(),
        fraction: meter.fraction(),
    }
}

/// Система: resolve hitbox overlaps.
///
/// Игнорируем:
/// - self-overlap и неверную категорию (player hitbox не бьёт игрока)
/// - hitbox, который у источника уже не активен (stale overlap)
/// - жертву в Attacking / Stunned / Dead
///
/// Успешный хит: жертва оглушена, её хитбоксы сброшены, энергия игрока
/// меняется (жертва −, атакующий +). Enemy hitbox, задевший игрока,
/// расходуется в любом случае.
#[allow(clippy::too_many_arguments)]
pub fn resolve_hitbox_overlaps(
    mut overlaps: EventReader<HitboxOverlap>,
    clock: Res<SimClock>,
    config: Res<CombatConfig>,
    mut combatants: Query<&mut Combatant>,
    mut meters: Query<&mut EnergyMeter>,
    mut stunned: EventWriter<CombatantStunned>,
    mut animations: EventWriter<AnimationRequest>,
    mut toggles: EventWriter<HitboxToggled>,
    mut energy: EventWriter<EnergyChanged>,
) {
    let now = clock.now();

    for overlap in overlaps.read() {
        let HitboxOverlap {
            source,
            hitbox,
            category,
            victim,
        } = *overlap;

        if source == victim || hitbox.category() != category {
            continue;
        }

        let source_role = match combatants.get(source) {
            Ok(attacker) if attacker.is_hitbox_active(hitbox) => attacker.role,
            _ => {
                crate::logger::log(&format!("👻 Stale overlap {:?} from {:?} ignored", hitbox, source));
                continue;
            }
        };

        let Ok(mut target) = combatants.get_mut(victim) else {
            continue;
        };
        if !category.hurts(target.role) {
            continue;
        }
        let victim_role = target.role;

        let stun_duration = match victim_role {
            CombatRole::Player => config.player.stun_duration,
            CombatRole::Enemy => config.enemy.stun_duration,
        };

        match target.try_stun(now, stun_duration) {
            Some(cleared) => {
                for cleared_hitbox in cleared {
                    toggles.write(HitboxToggled {
                        entity: victim,
                        hitbox: cleared_hitbox,
                        active: false,
                    });
                }
                animations.write(AnimationRequest {
                    entity: victim,
                    cue: AnimationCue::GetHit,
                    mode: PlaybackMode::Restart,
                });
                stunned.write(CombatantStunned {
                    entity: victim,
                    attacker: source,
                    until: now + f64::from(stun_duration),
                });
                crate::logger::log(&format!(
                    "💥 {:?} stunned by {:?} ({:?}) for {:.2}s",
                    victim, source, hitbox, stun_duration
                ));

                if victim_role == CombatRole::Player {
                    if let Ok(mut meter) = meters.get_mut(victim) {
                        if meter.lose(config.energy.loss_per_hit) {
                            energy.write(energy_changed(victim, &meter));
                        }
                    }
                }
                if source_role == CombatRole::Player {
                    if let Ok(mut meter) = meters.get_mut(source) {
                        if meter.gain(config.energy.gain_per_hit) {
                            energy.write(energy_changed(source, &meter));
                            if meter.is_full() {
                                crate::logger::log_info("⚡ Energy full: ultimate ready");
                            }
                        }
                    }
                }
            }
            None => {
                crate::logger::log(&format!(
                    "🛡️ Hit on {:?} ignored ({:?})",
                    victim,
                    target.state(now)
                ));
            }
        }

        // Enemy hitbox расходуется о тело игрока
        if victim_role == CombatRole::Player {
            if let Ok(mut attacker) = combatants.get_mut(source) {
                if attacker.deactivate_hitbox(hitbox) {
                    toggles.write(HitboxToggled {
                        entity: source,
                        hitbox,
                        active: false,
                    });
                }
            }
        }
    }
}

//! Enemy approach system.

use bevy::prelude::*;

use crate::combat::components::Combatant;
use crate::combat::encounter::EncounterRoster;
use crate::components::{Enemy, Locomotion};
use crate::config::{CombatConfig, EngagementTuning};
use crate::navigation::Navigation;
use crate::schedule::SimClock;

/// Outcome of one approach evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachDecision {
    /// Path found, still far: walk.
    Walk,
    /// Close enough (or blocked / incapacitated): stand.
    Stop,
}

/// One lerp step of the animator blend toward `goal`.
pub fn blend_toward(current: f32, goal: f32, rate: f32) -> f32 {
    current + (goal - current) * rate
}

/// Decide walk/stop from the oracle's remaining distance (`None` = no path).
pub fn decide_approach(remaining_distance: Option<f32>, tuning: &EngagementTuning) -> ApproachDecision {
    match remaining_distance {
        Some(remaining) if remaining >= tuning.stop_distance => ApproachDecision::Walk,
        _ => ApproachDecision::Stop,
    }
}

fn apply(decision: ApproachDecision, locomotion: &mut Locomotion, combatant: &mut Combatant, tuning: &EngagementTuning) {
    match decision {
        ApproachDecision::Walk => {
            locomotion.speed = tuning.approach_speed;
            locomotion.blend = blend_toward(locomotion.blend, 1.0, tuning.blend_rate);
            combatant.approaching = true;
        }
        ApproachDecision::Stop => {
            locomotion.speed = 0.0;
            locomotion.blend = blend_toward(locomotion.blend, 0.0, tuning.blend_rate);
            combatant.approaching = false;
        }
    }
}

/// Система: enemy approach (roster order).
///
/// - Dead: стоим, blend = 0
/// - Stunned: стоим, blend затухает
/// - иначе: путь к цели через navigation oracle; `remaining < stop_distance`
///   → стоп, иначе идём с `approach_speed`
pub fn drive_enemy_approach(
    clock: Res<SimClock>,
    config: Res<CombatConfig>,
    roster: Res<EncounterRoster>,
    navigation: Option<Res<Navigation>>,
    mut enemies: Query<(&Transform, &mut Combatant, &mut Locomotion, &Enemy)>,
    targets: Query<&Transform, Without<Enemy>>,
) {
    let now = clock.now();
    let tuning = &config.engagement;

    for &entity in roster.enemies() {
        let Ok((transform, mut combatant, mut locomotion, enemy)) = enemies.get_mut(entity) else {
            continue;
        };

        if combatant.is_dead {
            if locomotion.speed != 0.0 || locomotion.blend != 0.0 {
                locomotion.halt();
            }
            combatant.approaching = false;
            continue;
        }

        let decision = if combatant.is_stunned(now) {
            ApproachDecision::Stop
        } else {
            let remaining = match (&navigation, targets.get(enemy.target)) {
                (Some(navigation), Ok(target)) => navigation
                    .try_compute_path(transform.translation, target.translation)
                    .map(|path| path.remaining_distance()),
                _ => None,
            };
            decide_approach(remaining, tuning)
        };

        apply(decision, &mut locomotion, &mut combatant, tuning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_converges_by_halves() {
        let mut blend = 0.0;
        blend = blend_toward(blend, 1.0, 0.5);
        assert_eq!(blend, 0.5);
        blend = blend_toward(blend, 1.0, 0.5);
        assert_eq!(blend, 0.75);
        blend = blend_toward(blend, 0.0, 0.5);
        assert_eq!(blend, 0.375);
    }

    #[test]
    fn test_stop_threshold_and_path_failure() {
        let tuning = EngagementTuning::default();
        assert_eq!(decide_approach(Some(25.0), &tuning), ApproachDecision::Walk);
        assert_eq!(decide_approach(Some(10.0), &tuning), ApproachDecision::Walk);
        assert_eq!(decide_approach(Some(9.9), &tuning), ApproachDecision::Stop);
        assert_eq!(decide_approach(None, &tuning), ApproachDecision::Stop);
    }

    #[test]
    fn test_walk_marks_approaching() {
        let tuning = EngagementTuning::default();
        let mut locomotion = Locomotion::default();
        let mut combatant = Combatant::enemy();

        apply(ApproachDecision::Walk, &mut locomotion, &mut combatant, &tuning);
        assert_eq!(locomotion.speed, 15.0);
        assert!(combatant.approaching);

        apply(ApproachDecision::Stop, &mut locomotion, &mut combatant, &tuning);
        assert_eq!(locomotion.speed, 0.0);
        assert_eq!(locomotion.blend, 0.25);
        assert!(!combatant.approaching);
    }
}

//! Ultimate-target acquisition.
//!
//! Раз в тик (только при полном meter) выбираем ближайшего живого врага
//! внутри радиуса и симметричного конуса камеры. Подсветка - максимум у
//! одного врага.

use bevy::prelude::*;

use crate::combat::components::{Combatant, EnergyMeter};
use crate::combat::encounter::EncounterRoster;
use crate::components::{CameraForward, Enemy, Player};
use crate::config::CombatConfig;

/// Current ultimate target (derived each tick, cached for the highlight diff).
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UltimateTarget {
    pub current: Option<Entity>,
}

/// Unsigned angle in degrees between two vectors.
///
/// A degenerate (near-zero) vector yields 0°.
pub fn view_angle_deg(forward: Vec3, to_target: Vec3) -> f32 {
    let denominator = (forward.length_squared() * to_target.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let cos = (forward.dot(to_target) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Pick the closest candidate with `distance < range` and
/// `|angle| < half_angle_deg`. Equal distances keep the earlier candidate.
///
/// Returns the chosen entity and its distance.
pub fn select_ultimate_target(
    origin: Vec3,
    forward: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
    range: f32,
    half_angle_deg: f32,
) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32)> = None;

    for (entity, position) in candidates {
        let to_candidate = position - origin;
        let distance = to_candidate.length();
        if !(distance < range) {
            continue;
        }
        if best.is_some_and(|(_, best_distance)| distance >= best_distance) {
            continue;
        }
        if view_angle_deg(forward, to_candidate).abs() < half_angle_deg {
            best = Some((entity, distance));
        }
    }

    best
}

/// Система: refresh ultimate target + highlight diff.
///
/// Candidates are the non-dead enemies in roster order. With the meter not
/// full the selection is empty (and any old highlight goes away).
pub fn refresh_ultimate_target(
    config: Res<CombatConfig>,
    roster: Res<EncounterRoster>,
    mut target: ResMut<UltimateTarget>,
    players: Query<(&Transform, &CameraForward, &EnergyMeter), With<Player>>,
    mut enemies: Query<(&Transform, &Combatant, &mut Enemy)>,
) {
    let selection = match players.single() {
        Ok((player_transform, camera_forward, meter)) if meter.is_full() => {
            let candidates = roster.enemies().iter().filter_map(|&entity| {
                enemies
                    .get(entity)
                    .ok()
                    .filter(|(_, combatant, _)| !combatant.is_dead)
                    .map(|(transform, _, _)| (entity, transform.translation))
            });
            select_ultimate_target(
                player_transform.translation,
                camera_forward.0,
                candidates,
                config.ultimate.range,
                config.ultimate.cone_half_angle_deg,
            )
            .map(|(entity, _)| entity)
        }
        _ => None,
    };

    if selection == target.current {
        return;
    }

    if let Some(previous) = target.current {
        if let Ok((_, _, mut enemy)) = enemies.get_mut(previous) {
            enemy.highlighted = false;
        }
    }
    if let Some(next) = selection {
        if let Ok((_, _, mut enemy)) = enemies.get_mut(next) {
            enemy.highlighted = true;
        }
        crate::logger::log(&format!("🎯 Ultimate target → {:?}", next));
    }
    target.current = selection;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    /// Point at `distance` on the XZ plane, `angle_deg` off -Z.
    fn at(distance: f32, angle_deg: f32) -> Vec3 {
        let radians = angle_deg.to_radians();
        Vec3::new(radians.sin(), 0.0, -radians.cos()) * distance
    }

    #[test]
    fn test_range_filter_beats_ordering() {
        // Enemy within 20 at 30°, another at 40 dead ahead: только первый
        let ids = entities(2);
        let candidates = [(ids[1], at(40.0, 0.0)), (ids[0], at(20.0, 30.0))];

        let selected = select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, candidates, 30.0, 70.0);

        assert_eq!(selected.map(|(entity, _)| entity), Some(ids[0]));
    }

    #[test]
    fn test_cone_is_symmetric() {
        let ids = entities(2);
        let left = select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, [(ids[0], at(10.0, -60.0))], 30.0, 70.0);
        let right = select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, [(ids[1], at(10.0, 60.0))], 30.0, 70.0);

        assert_eq!(left.map(|(entity, _)| entity), Some(ids[0]));
        assert_eq!(right.map(|(entity, _)| entity), Some(ids[1]));

        let behind = select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, [(ids[0], at(10.0, 120.0))], 30.0, 70.0);
        assert!(behind.is_none());
    }

    #[test]
    fn test_closest_wins_and_ties_keep_first() {
        let ids = entities(3);
        let candidates = [
            (ids[0], at(12.0, 10.0)),
            (ids[1], at(6.0, -10.0)),
            (ids[2], at(6.0, 10.0)),
        ];

        let (entity, distance) =
            select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, candidates, 30.0, 70.0).unwrap();

        assert_eq!(entity, ids[1]);
        assert!((distance - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounds_are_strict() {
        let ids = entities(1);
        assert!(select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, [(ids[0], at(30.0, 0.0))], 30.0, 70.0).is_none());
        assert!(select_ultimate_target(Vec3::ZERO, Vec3::X, [(ids[0], Vec3::new(0.0, 0.0, 5.0))], 30.0, 89.0).is_none());
    }

    #[test]
    fn test_no_candidates_means_no_target() {
        let empty: [(Entity, Vec3); 0] = [];
        assert!(select_ultimate_target(Vec3::ZERO, Vec3::NEG_Z, empty, 30.0, 70.0).is_none());
    }

    #[test]
    fn test_degenerate_vectors_have_zero_angle() {
        assert_eq!(view_angle_deg(Vec3::NEG_Z, Vec3::ZERO), 0.0);
        assert_eq!(view_angle_deg(Vec3::ZERO, Vec3::X), 0.0);
        assert!((view_angle_deg(Vec3::X, Vec3::NEG_X) - 180.0).abs() < 1e-3);

        let ids = entities(1);
        let on_top = select_ultimate_target(Vec3::ONE, Vec3::NEG_Z, [(ids[0], Vec3::ONE)], 30.0, 70.0);
        assert_eq!(on_top.map(|(entity, _)| entity), Some(ids[0]));
    }
}

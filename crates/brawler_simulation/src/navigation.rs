//! Navigation oracle boundary.
//!
//! Path solving is owned by the host (navmesh agent, engine pathfinder).
//! Ядро спрашивает только "есть ли путь и сколько осталось идти".

use bevy::prelude::*;

/// Path returned by the oracle: ordered waypoints from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavPath {
    pub waypoints: Vec<Vec3>,
}

impl NavPath {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }

    /// Sum of segment lengths along the path.
    pub fn remaining_distance(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

/// Path solver contract. `None` = no path (agent stays put).
pub trait NavigationOracle: Send + Sync + 'static {
    fn try_compute_path(&self, from: Vec3, to: Vec3) -> Option<NavPath>;
}

/// Bound navigation collaborator (required at startup).
#[derive(Resource)]
pub struct Navigation(pub Box<dyn NavigationOracle>);

impl Navigation {
    pub fn new(oracle: impl NavigationOracle) -> Self {
        Self(Box::new(oracle))
    }

    pub fn try_compute_path(&self, from: Vec3, to: Vec3) -> Option<NavPath> {
        self.0.try_compute_path(from, to)
    }
}

/// Open-floor oracle: straight segment, no obstacles. Used by the headless
/// binary and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineNavigation;

impl NavigationOracle for StraightLineNavigation {
    fn try_compute_path(&self, from: Vec3, to: Vec3) -> Option<NavPath> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        Some(NavPath::new(vec![from, to]))
    }
}

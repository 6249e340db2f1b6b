//! Movement компоненты: скорость врага и блокировка движения игрока.
//!
//! Ядро не двигает акторов само: движение/навигация читают эти компоненты.

use bevy::prelude::*;

/// Enemy locomotion output for the navigation agent and animator.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Navigation agent speed (m/s). 0 = stand still.
    pub speed: f32,
    /// Animator "Speed" blend value in [0, 1].
    pub blend: f32,
}

impl Locomotion {
    pub fn halt(&mut self) {
        self.speed = 0.0;
        self.blend = 0.0;
    }
}

/// Player controller gate: locked while Attacking, Stunned or after the
/// encounter ended.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MovementGate {
    pub locked: bool,
}

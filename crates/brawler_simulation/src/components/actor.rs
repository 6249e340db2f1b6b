//! Акторы: игрок и враги.

use bevy::prelude::*;

use crate::combat::components::{Combatant, EnergyMeter};
use crate::components::{AttackIntent, BasicCombo, CameraForward, Locomotion, MovementGate};

/// Marker для player-controlled entity (ровно один на encounter).
///
/// Required components (combat state, energy meter, input flags, combo,
/// camera forward, movement gate) come with the marker.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Combatant = Combatant::player(),
    EnergyMeter,
    AttackIntent,
    BasicCombo,
    CameraForward,
    MovementGate,
    Transform
)]
pub struct Player;

/// Enemy combatant chasing `target` (the player).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Combatant = Combatant::enemy(), Locomotion, Transform)]
pub struct Enemy {
    pub target: Entity,
    /// Ultimate-target highlight (at most one enemy carries it).
    pub highlighted: bool,
}

impl Enemy {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            highlighted: false,
        }
    }
}

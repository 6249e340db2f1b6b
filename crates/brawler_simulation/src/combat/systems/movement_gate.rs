//! Player movement gate.

use bevy::prelude::*;

use crate::combat::components::Combatant;
use crate::combat::encounter::EncounterState;
use crate::components::{MovementGate, Player};
use crate::schedule::SimClock;

/// Система: lock player movement while Attacking/Stunned and after the
/// encounter has finished.
pub fn update_movement_gate(
    clock: Res<SimClock>,
    encounter: Res<EncounterState>,
    mut players: Query<(&Combatant, &mut MovementGate), With<Player>>,
) {
    let now = clock.now();

    for (combatant, mut gate) in players.iter_mut() {
        let locked = encounter.is_finished() || combatant.is_busy(now);
        // Пишем только при изменении (Changed<MovementGate> для контроллера)
        if gate.locked != locked {
            gate.locked = locked;
        }
    }
}

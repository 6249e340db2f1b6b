//! Encounter bookkeeping: roster (spawn order) and completion check.
//!
//! Проверка завершения НЕ крутится каждый тик: её планирует только
//! ultimate (единственный способ убить врага).

use bevy::prelude::*;

use crate::combat::components::Combatant;
use crate::combat::events::EncounterFinished;

/// Enemies in spawn order. Every per-enemy pass that has an order-dependent
/// outcome (targeting tie-break, attack decisions) iterates this list.
#[derive(Resource, Debug, Default, Clone)]
pub struct EncounterRoster {
    enemies: Vec<Entity>,
}

impl EncounterRoster {
    pub fn register(&mut self, enemy: Entity) {
        if !self.enemies.contains(&enemy) {
            self.enemies.push(enemy);
        }
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// Encounter lifecycle. `Finished` is terminal.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EncounterState {
    #[default]
    InProgress,
    Finished,
}

impl EncounterState {
    pub fn is_finished(self) -> bool {
        self == EncounterState::Finished
    }
}

/// True when every rostered enemy is dead. Despawned entries count as dead;
/// an empty roster is trivially cleared.
pub fn all_enemies_dead(world: &World) -> bool {
    let Some(roster) = world.get_resource::<EncounterRoster>() else {
        return true;
    };
    roster.enemies().iter().all(|&enemy| {
        world
            .get::<Combatant>(enemy)
            .map_or(true, |combatant| combatant.is_dead)
    })
}

/// Deferred callback body: finish the encounter if nobody is left standing.
///
/// Returns true only on the InProgress → Finished transition. Not
/// re-scheduled on failure.
pub fn run_completion_check(world: &mut World) -> bool {
    if world
        .get_resource::<EncounterState>()
        .is_some_and(|state| state.is_finished())
    {
        return false;
    }

    if !all_enemies_dead(world) {
        crate::logger::log("🏁 Completion check: enemies still standing");
        return false;
    }

    world.insert_resource(EncounterState::Finished);
    world.send_event(EncounterFinished);
    crate::logger::log_info("🏁 Encounter finished: all enemies down");
    true
}

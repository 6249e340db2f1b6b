//! Tick driver: simulation clock, deferred actions, combat schedule.
//!
//! Один логический тик = `advance(world, dt)`:
//! 1. SimClock += dt
//! 2. CombatTick schedule (все фазы по порядку, см. `CombatSet`)
//! 3. flush combat event buffers
//!
//! Внутри тика ничего не блокируется: "ожидание" - это только deferred actions.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

pub mod clock;
pub mod deferred;


pub use clock::SimClock;
pub use deferred::{
    drain_deferred_actions, schedule_after_in_world, DeferredAction, DeferredActions, DeferredTrigger,
    Scheduler,
};

/// Schedule that runs exactly once per simulation tick.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatTick;

/// Phases of a combat tick, chained in this order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Animation signals from the animation driver.
    Signals,
    /// Window expiry bookkeeping and hit resolution.
    Resolve,
    /// Enemy approach (navigation oracle).
    Locomotion,
    /// Attack starts (player intents, enemy range bands).
    Decide,
    /// Ultimate targeting and execution, movement gate.
    Ultimate,
    /// Deferred action drain.
    Deferred,
}

/// Schedule plugin: clock, deferred queue, phase ordering.
pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .init_resource::<DeferredActions>()
            .init_schedule(CombatTick)
            .configure_sets(
                CombatTick,
                (
                    CombatSet::Signals,
                    CombatSet::Resolve,
                    CombatSet::Locomotion,
                    CombatSet::Decide,
                    CombatSet::Ultimate,
                    CombatSet::Deferred,
                )
                    .chain(),
            )
            .add_systems(CombatTick, drain_deferred_actions.in_set(CombatSet::Deferred))
            // Real-time embedding: FixedUpdate drives the same tick
            .add_systems(FixedUpdate, run_fixed_combat_tick);
    }
}

/// Drive one tick deterministically (tests, headless binary, external loops).
pub fn advance(world: &mut World, dt: f32) {
    step(world, dt);
    crate::combat::events::flush_combat_events(world);
}

fn step(world: &mut World, dt: f32) {
    world.resource_mut::<SimClock>().advance(dt);
    world.run_schedule(CombatTick);
}

/// System: FixedUpdate hook, one combat tick per fixed step.
///
/// Event buffers are left to Bevy's own `First` update in this mode.
pub fn run_fixed_combat_tick(world: &mut World) {
    let Some(dt) = world.get_resource::<Time<Fixed>>().map(|time| time.delta_secs()) else {
        return;
    };
    step(world, dt);
}

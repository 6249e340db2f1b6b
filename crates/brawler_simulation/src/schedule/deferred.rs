//! Deferred Action Scheduler.
//!
//! One-shot callbacks fired after a delay or once a predicate holds.
//! Evaluated once per tick by `drain_deferred_actions`.
//!
//! # Rules
//!
//! - Actions fire in FIFO registration order.
//! - An action registered during tick N is eligible from tick N+1 on, never
//!   in the tick it was registered (also covers callbacks that schedule more
//!   callbacks while the queue is draining).
//! - No cancellation. Callbacks capture `Entity` ids, not references, and must
//!   check the target themselves (despawned, dead, no longer attacking...).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::clock::SimClock;

/// Callback run against the world when an action fires.
pub type DeferredCallback = Box<dyn FnOnce(&mut World) + Send + Sync>;

/// Predicate polled once per tick for `schedule_when` actions.
pub type DeferredPredicate = Box<dyn Fn(&World) -> bool + Send + Sync>;

pub enum DeferredTrigger {
    /// Fire once `SimClock::now() >= fire_at`.
    At(f64),
    /// Fire once the predicate evaluates true.
    When(DeferredPredicate),
}

impl std::fmt::Debug for DeferredTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeferredTrigger::At(fire_at) => f.debug_tuple("At").field(fire_at).finish(),
            DeferredTrigger::When(_) => f.write_str("When(..)"),
        }
    }
}

pub struct DeferredAction {
    pub trigger: DeferredTrigger,
    /// Tick on which the action was registered.
    pub registered_tick: u64,
    callback: DeferredCallback,
}

impl DeferredAction {
    fn is_due(&self, clock: &SimClock, world: &World) -> bool {
        if clock.tick() <= self.registered_tick {
            return false;
        }
        match &self.trigger {
            DeferredTrigger::At(fire_at) => *fire_at <= clock.now(),
            DeferredTrigger::When(predicate) => predicate(world),
        }
    }
}

impl std::fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredAction")
            .field("trigger", &self.trigger)
            .field("registered_tick", &self.registered_tick)
            .finish_non_exhaustive()
    }
}

/// Pending deferred actions (owned queue, no global locator).
#[derive(Resource, Debug, Default)]
pub struct DeferredActions {
    pending: Vec<DeferredAction>,
}

impl DeferredActions {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule_after(
        &mut self,
        clock: &SimClock,
        delay: f32,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        self.push(clock, DeferredTrigger::At(clock.after(delay)), Box::new(callback));
    }

    pub fn schedule_when(
        &mut self,
        clock: &SimClock,
        predicate: impl Fn(&World) -> bool + Send + Sync + 'static,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        self.push(clock, DeferredTrigger::When(Box::new(predicate)), Box::new(callback));
    }

    /// Zero-delay action: runs on the next tick.
    pub fn schedule_next_tick(
        &mut self,
        clock: &SimClock,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        self.schedule_after(clock, 0.0, callback);
    }

    fn push(&mut self, clock: &SimClock, trigger: DeferredTrigger, callback: DeferredCallback) {
        self.pending.push(DeferredAction {
            trigger,
            registered_tick: clock.tick(),
            callback,
        });
    }
}

/// SystemParam: clock + queue, so systems can write `scheduler.after(0.3, ...)`.
#[derive(SystemParam)]
pub struct Scheduler<'w> {
    clock: Res<'w, SimClock>,
    actions: ResMut<'w, DeferredActions>,
}

impl Scheduler<'_> {
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn clock(&self) -> SimClock {
        *self.clock
    }

    pub fn after(&mut self, delay: f32, callback: impl FnOnce(&mut World) + Send + Sync + 'static) {
        let clock = *self.clock;
        self.actions.schedule_after(&clock, delay, callback);
    }

    pub fn when(
        &mut self,
        predicate: impl Fn(&World) -> bool + Send + Sync + 'static,
        callback: impl FnOnce(&mut World) + Send + Sync + 'static,
    ) {
        let clock = *self.clock;
        self.actions.schedule_when(&clock, predicate, callback);
    }

    pub fn next_tick(&mut self, callback: impl FnOnce(&mut World) + Send + Sync + 'static) {
        let clock = *self.clock;
        self.actions.schedule_next_tick(&clock, callback);
    }
}

/// Schedule from inside another deferred callback (exclusive world access).
pub fn schedule_after_in_world(
    world: &mut World,
    delay: f32,
    callback: impl FnOnce(&mut World) + Send + Sync + 'static,
) {
    let clock = *world.resource::<SimClock>();
    world
        .resource_mut::<DeferredActions>()
        .schedule_after(&clock, delay, callback);
}

/// System: fire every due action, FIFO.
///
/// Due-ness is evaluated for the whole queue first, then the callbacks run.
/// Whatever the callbacks schedule lands behind the still-pending actions.
pub fn drain_deferred_actions(world: &mut World) {
    let clock = *world.resource::<SimClock>();
    let pending = std::mem::take(&mut world.resource_mut::<DeferredActions>().pending);
    if pending.is_empty() {
        return;
    }

    let mut kept = Vec::with_capacity(pending.len());
    let mut due = Vec::new();
    for action in pending {
        if action.is_due(&clock, world) {
            due.push(action.callback);
        } else {
            kept.push(action);
        }
    }

    for callback in due {
        callback(world);
    }

    let mut actions = world.resource_mut::<DeferredActions>();
    let registered_while_draining = std::mem::take(&mut actions.pending);
    actions.pending = kept;
    actions.pending.extend(registered_while_draining);
}

//! Combat events - граница между ядром и внешними коллабораторами.
//!
//! In (collaborator → core):
//! - `HitboxOverlap`: physics overlap begin, tagged by hitbox category
//! - `AnimationSignal`: animation state entered / exited
//!
//! Out (core → collaborator):
//! - `AnimationRequest`: trigger/play/restart a clip
//! - `HitboxToggled`: enable/disable a hitbox collider
//! - `CombatantStunned`, `EnergyChanged`, `FinisherExecuted`
//! - `PostDeathReaction`: start ragdoll for a finished enemy
//! - `EncounterFinished`: show the end-of-encounter menu

use bevy::prelude::*;

use crate::combat::components::{HitCategory, HitboxId};

// ============================================================================
// Inputs
// ============================================================================

/// Overlap begin between an attack hitbox and a combatant.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitboxOverlap {
    /// Combatant that owns the hitbox.
    pub source: Entity,
    pub hitbox: HitboxId,
    pub category: HitCategory,
    /// Combatant whose body entered the hitbox.
    pub victim: Entity,
}

impl HitboxOverlap {
    pub fn new(source: Entity, hitbox: HitboxId, victim: Entity) -> Self {
        Self {
            source,
            hitbox,
            category: hitbox.category(),
            victim,
        }
    }
}

/// Signals reported by the animation driver.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AnimationSignal {
    /// An attack state was entered. Authoring data comes with it.
    StateEntered {
        entity: Entity,
        /// Hitbox to enable after `attack_delay`, if any.
        hitbox: Option<HitboxId>,
        attack_delay: f32,
        /// Busy duration counted from state entry.
        timeout: f32,
        /// Whether this state (re)opens the attack-busy window.
        opens_window: bool,
    },
    /// An attack state was exited: its hitbox must be off.
    StateExited {
        entity: Entity,
        hitbox: Option<HitboxId>,
    },
}

// ============================================================================
// Outputs
// ============================================================================

/// Clip identifiers, resolved once instead of string names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationCue {
    BasicAttack,
    EnemyBasicAttack,
    EnemySpecialAttack,
    GetHit,
    SpecialAttack01,
    SpecialAttack02,
    GetSpecialAttack01,
    GetSpecialAttack02,
}

/// How the animation driver should start the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PlaybackMode {
    /// Fire a state machine trigger.
    Trigger,
    /// Jump straight into the clip.
    Play,
    /// Rebind the animator and play from the start.
    Restart,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub entity: Entity,
    pub cue: AnimationCue,
    pub mode: PlaybackMode,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitboxToggled {
    pub entity: Entity,
    pub hitbox: HitboxId,
    pub active: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatantStunned {
    pub entity: Entity,
    pub attacker: Entity,
    pub until: f64,
}

/// Meter changed (UI fill tween).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnergyChanged {
    pub entity: Entity,
    pub value: f32,
    pub fraction: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FinisherExecuted {
    pub attacker: Entity,
    pub target: Entity,
    /// 0 or 1, alternating per ultimate.
    pub variant: usize,
}

/// Post-death physical reaction (ragdoll) for a finished enemy.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PostDeathReaction {
    pub entity: Entity,
    pub variant: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterFinished;

/// Register all combat events.
pub(crate) fn register_combat_events(app: &mut App) {
    app.add_event::<HitboxOverlap>()
        .add_event::<AnimationSignal>()
        .add_event::<AnimationRequest>()
        .add_event::<HitboxToggled>()
        .add_event::<CombatantStunned>()
        .add_event::<EnergyChanged>()
        .add_event::<FinisherExecuted>()
        .add_event::<PostDeathReaction>()
        .add_event::<EncounterFinished>();
}

/// Swap event buffers after a manually driven tick.
pub(crate) fn flush_combat_events(world: &mut World) {
    fn flush<E: Event>(world: &mut World) {
        if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
            events.update();
        }
    }

    flush::<HitboxOverlap>(world);
    flush::<AnimationSignal>(world);
    flush::<AnimationRequest>(world);
    flush::<HitboxToggled>(world);
    flush::<CombatantStunned>(world);
    flush::<EnergyChanged>(world);
    flush::<FinisherExecuted>(world);
    flush::<PostDeathReaction>(world);
    flush::<EncounterFinished>(world);
}

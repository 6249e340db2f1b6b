//! Combat module: combatant state machine, hit resolution, energy, ultimate.
//!
//! ECS ответственность:
//! - Timing state: attack/stun windows, cooldown anchor, active hitboxes
//! - Combat rules: range bands, stun, energy, ultimate targeting
//! - Events: AnimationRequest, HitboxToggled, CombatantStunned, ...
//!
//! Коллабораторы (движок) ответственность:
//! - Animation driver: clips, StateEntered/StateExited signals
//! - Physics: hitbox colliders → HitboxOverlap
//! - UI/menu: EnergyChanged, EncounterFinished

use bevy::prelude::*;

pub mod components;
pub mod encounter;
pub mod events;
pub mod systems;
pub mod targeting;
pub mod window;

// Re-export основных типов
pub use components::{
    AttackKind, CombatRole, Combatant, CombatantState, EnergyMeter, HitCategory, HitboxId,
};
pub use encounter::{all_enemies_dead, run_completion_check, EncounterRoster, EncounterState};
pub use events::{
    AnimationCue, AnimationRequest, AnimationSignal, CombatantStunned, EncounterFinished, EnergyChanged,
    FinisherExecuted, HitboxOverlap, HitboxToggled, PlaybackMode, PostDeathReaction,
};
pub use systems::{choose_enemy_attack, FinisherCount};
pub use targeting::{select_ultimate_target, view_angle_deg, UltimateTarget};
pub use window::TimedWindow;

use crate::schedule::{CombatSet, CombatTick};

/// Combat Plugin
///
/// Регистрирует combat системы в `CombatTick` по фазам `CombatSet`.
///
/// Порядок выполнения:
/// 1. Signals - consume_animation_signals (StateEntered/StateExited)
/// 2. Resolve - retire_expired_attacks → resolve_hitbox_overlaps
/// 3. Decide - player_basic_attack → enemy_attack_decisions
/// 4. Ultimate - refresh_ultimate_target → execute_ultimate → update_movement_gate
///
/// Locomotion (AIPlugin) идёт между Resolve и Decide, deferred drain - последним.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        events::register_combat_events(app);

        app.init_resource::<EncounterRoster>()
            .init_resource::<EncounterState>()
            .init_resource::<UltimateTarget>()
            .init_resource::<FinisherCount>();

        app.add_systems(CombatTick, systems::consume_animation_signals.in_set(CombatSet::Signals))
            .add_systems(
                CombatTick,
                (systems::retire_expired_attacks, systems::resolve_hitbox_overlaps)
                    .chain()
                    .in_set(CombatSet::Resolve),
            )
            .add_systems(
                CombatTick,
                (systems::player_basic_attack, systems::enemy_attack_decisions)
                    .chain()
                    .in_set(CombatSet::Decide),
            )
            .add_systems(
                CombatTick,
                (
                    targeting::refresh_ultimate_target,
                    systems::execute_ultimate,
                    systems::update_movement_gate,
                )
                    .chain()
                    .in_set(CombatSet::Ultimate),
            );
    }
}

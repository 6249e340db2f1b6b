//! Brawler Simulation Core
//!
//! Combat-timing ядро action-игры на Bevy 0.16 ECS (headless).
//!
//! HYBRID ARCHITECTURE:
//! - ECS = timing state (attack/stun windows, cooldowns, hitboxes, energy,
//!   ultimate targeting, encounter end)
//! - Host engine = rendering, animation graph, physics, navigation, UI
//!
//! Один тик = `advance(world, dt)`; коллабораторы общаются с ядром через
//! события (`HitboxOverlap`, `AnimationSignal` → ядро → `AnimationRequest`, ...).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod navigation;
pub mod schedule;
pub mod scripted;

// Re-export базовых типов для удобства
pub use ai::AIPlugin;
pub use combat::{
    AnimationCue, AnimationRequest, AnimationSignal, AttackKind, CombatPlugin, CombatRole, Combatant,
    CombatantState, CombatantStunned, EncounterFinished, EncounterRoster, EncounterState, EnergyChanged,
    EnergyMeter, FinisherExecuted, HitCategory, HitboxId, HitboxOverlap, HitboxToggled, PlaybackMode,
    PostDeathReaction, TimedWindow, UltimateTarget,
};
pub use components::*;
pub use config::CombatConfig;
pub use error::CombatError;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{NavPath, Navigation, NavigationOracle, StraightLineNavigation};
pub use schedule::{advance, CombatSet, CombatTick, DeferredActions, SchedulePlugin, Scheduler, SimClock};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если хост не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app
            // Fixed timestep 60Hz для real-time embedding (FixedUpdate → CombatTick)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<CombatConfig>()
            // Подсистемы
            .add_plugins((SchedulePlugin, CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Validated, fully wired simulation app.
///
/// Fails fast on an invalid config or a missing collaborator; nothing
/// mid-encounter can fail after this returns.
pub fn build_simulation(config: CombatConfig, navigation: impl NavigationOracle) -> Result<App, CombatError> {
    config.validate()?;

    let mut app = create_headless_app(DEFAULT_SEED);
    app.insert_resource(config)
        .insert_resource(Navigation::new(navigation))
        .add_plugins(SimulationPlugin);

    ensure_collaborators(app.world())?;
    Ok(app)
}

/// Startup check: everything the combat tick reads must be bound.
pub fn ensure_collaborators(world: &World) -> Result<(), CombatError> {
    if !world.contains_resource::<Navigation>() {
        return Err(CombatError::MissingCollaborator("navigation oracle"));
    }
    if !world.contains_resource::<CombatConfig>() {
        return Err(CombatError::MissingCollaborator("combat config"));
    }
    if !world.contains_resource::<SimClock>() || !world.contains_resource::<DeferredActions>() {
        return Err(CombatError::MissingCollaborator("tick driver (SchedulePlugin)"));
    }
    if !world.contains_resource::<Events<AnimationRequest>>() || !world.contains_resource::<Events<HitboxOverlap>>() {
        return Err(CombatError::MissingCollaborator("animation/physics event channels (CombatPlugin)"));
    }
    Ok(())
}

/// Spawn the player with an energy meter sized from `CombatConfig`.
pub fn spawn_player(world: &mut World, transform: Transform) -> Entity {
    let max = world
        .get_resource::<CombatConfig>()
        .map_or(config::EnergyTuning::default().max, |config| config.energy.max);

    let player = world.spawn((Player, transform, EnergyMeter::new(max))).id();
    crate::logger::log(&format!("🧍 Player spawned {:?} at {:?}", player, transform.translation));
    player
}

/// Spawn an enemy chasing `target` and append it to the encounter roster.
pub fn spawn_enemy(world: &mut World, transform: Transform, target: Entity) -> Entity {
    let enemy = world.spawn((Enemy::new(target), transform)).id();
    world.get_resource_or_insert_with(EncounterRoster::default).register(enemy);
    crate::logger::log(&format!("👹 Enemy spawned {:?} at {:?}", enemy, transform.translation));
    enemy
}

/// Snapshot боевого состояния для сравнения детерминизма.
///
/// Roster order, then the player. Debug-форматирование достаточно: сравниваем
/// два прогона одного билда.
pub fn combat_snapshot(world: &mut World) -> String {
    let mut snapshot = String::new();

    let enemies = world
        .get_resource::<EncounterRoster>()
        .map(|roster| roster.enemies().to_vec())
        .unwrap_or_default();
    let mut players = world.query_filtered::<Entity, With<Player>>();
    let player_entities: Vec<Entity> = players.iter(world).collect();

    for entity in enemies.into_iter().chain(player_entities) {
        snapshot.push_str(&format!(
            "{:?}|{:?}|{:?}|{:?}|{:?}\n",
            world.get::<Combatant>(entity),
            world.get::<Transform>(entity).map(|transform| transform.translation),
            world.get::<EnergyMeter>(entity),
            world.get::<Locomotion>(entity),
            world.get::<MovementGate>(entity),
        ));
    }

    snapshot
}

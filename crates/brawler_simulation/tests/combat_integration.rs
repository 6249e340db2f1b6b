//! Combat integration test
//!
//! Полный App через `build_simulation`, хост эмулируем руками или через
//! `ScriptedEncounter`.
//!
//! Проверяем:
//! - Enemy attack bands (near → basic, far → special)
//! - Approach/stop через navigation oracle
//! - Инварианты state machine и energy на длинном прогоне
//! - Encounter завершается только когда все враги мертвы
//! - Fail-fast при неверном config / отсутствии коллабораторов

use bevy::prelude::*;
use brawler_simulation::scripted::ScriptedEncounter;
use brawler_simulation::*;

const DT: f32 = 0.125;

/// Helper: player в центре, один враг на `distance` по -Z
fn create_duel(distance: f32) -> (App, Entity, Entity) {
    let mut app = build_simulation(CombatConfig::default(), StraightLineNavigation).unwrap();
    let world = app.world_mut();
    let player = spawn_player(world, Transform::default());
    let enemy = spawn_enemy(world, Transform::from_xyz(0.0, 0.0, -distance), player);
    (app, player, enemy)
}

fn drain_requests(app: &mut App) -> Vec<AnimationRequest> {
    app.world_mut().resource_mut::<Events<AnimationRequest>>().drain().collect()
}

fn now(app: &App) -> f64 {
    app.world().resource::<SimClock>().now()
}

/// Navigation oracle без путей (враг заперт)
struct NoPathNavigation;

impl NavigationOracle for NoPathNavigation {
    fn try_compute_path(&self, _from: Vec3, _to: Vec3) -> Option<NavPath> {
        None
    }
}

#[test]
fn test_close_enemy_starts_basic_attack() {
    let (mut app, _player, enemy) = create_duel(5.0);
    advance(app.world_mut(), DT);

    let requests = drain_requests(&mut app);
    assert!(requests.contains(&AnimationRequest {
        entity: enemy,
        cue: AnimationCue::EnemyBasicAttack,
        mode: PlaybackMode::Trigger,
    }));

    let combatant = app.world().get::<Combatant>(enemy).unwrap();
    assert_eq!(combatant.state(now(&app)), CombatantState::Attacking);
    assert_eq!(combatant.current_attack, Some(AttackKind::Basic));
    assert!((combatant.attack_window.expiry() - 1.125).abs() < 1e-9);
}

#[test]
fn test_mid_range_enemy_starts_special_attack() {
    let (mut app, _player, enemy) = create_duel(10.0);
    advance(app.world_mut(), DT);

    let requests = drain_requests(&mut app);
    assert!(requests.contains(&AnimationRequest {
        entity: enemy,
        cue: AnimationCue::EnemySpecialAttack,
        mode: PlaybackMode::Trigger,
    }));
    let combatant = app.world().get::<Combatant>(enemy).unwrap();
    assert_eq!(combatant.current_attack, Some(AttackKind::Special));
}

#[test]
fn test_far_enemy_walks_and_does_not_attack() {
    let (mut app, _player, enemy) = create_duel(25.0);
    advance(app.world_mut(), DT);

    assert!(drain_requests(&mut app).is_empty());
    let combatant = app.world().get::<Combatant>(enemy).unwrap();
    assert_eq!(combatant.state(now(&app)), CombatantState::Approaching);

    let locomotion = *app.world().get::<Locomotion>(enemy).unwrap();
    assert_eq!(locomotion.speed, 15.0);
    assert_eq!(locomotion.blend, 0.5);

    advance(app.world_mut(), DT);
    assert_eq!(app.world().get::<Locomotion>(enemy).unwrap().blend, 0.75);
}

#[test]
fn test_enemy_stops_near_target_and_when_stunned() {
    let (mut app, _player, enemy) = create_duel(25.0);
    advance(app.world_mut(), DT);
    assert!(app.world().get::<Combatant>(enemy).unwrap().approaching);

    // Хост подвёл врага ближе stop_distance
    app.world_mut().get_mut::<Transform>(enemy).unwrap().translation = Vec3::new(0.0, 0.0, -9.0);
    advance(app.world_mut(), DT);
    let combatant = app.world().get::<Combatant>(enemy).unwrap();
    assert!(!combatant.approaching);
    assert_eq!(app.world().get::<Locomotion>(enemy).unwrap().speed, 0.0);

    // Далеко, но оглушён
    let (mut app, _player, enemy) = create_duel(25.0);
    let stun_at = now(&app);
    app.world_mut()
        .get_mut::<Combatant>(enemy)
        .unwrap()
        .try_stun(stun_at, 1.0)
        .unwrap();
    advance(app.world_mut(), DT);
    assert!(!app.world().get::<Combatant>(enemy).unwrap().approaching);
    assert_eq!(app.world().get::<Locomotion>(enemy).unwrap().speed, 0.0);
}

#[test]
fn test_missing_path_keeps_enemy_standing() {
    let mut app = build_simulation(CombatConfig::default(), NoPathNavigation).unwrap();
    let world = app.world_mut();
    let player = spawn_player(world, Transform::default());
    let enemy = spawn_enemy(world, Transform::from_xyz(0.0, 0.0, -25.0), player);

    advance(app.world_mut(), DT);
    assert!(!app.world().get::<Combatant>(enemy).unwrap().approaching);
    assert_eq!(app.world().get::<Locomotion>(enemy).unwrap().speed, 0.0);
}

#[test]
fn test_scripted_encounter_invariants_hold() {
    let config = CombatConfig::default();
    let max_energy = config.energy.max;
    let mut encounter = ScriptedEncounter::new(7, 3, config).unwrap();
    let mut dead_seen = vec![false; encounter.enemies.len()];

    for tick in 0..3000 {
        encounter.step(1.0 / 60.0);
        let world = encounter.app.world();
        let now = world.resource::<SimClock>().now();

        let meter = world.get::<EnergyMeter>(encounter.player).unwrap();
        assert!(
            meter.value() >= 0.0 && meter.value() <= max_energy,
            "Tick {}: energy {} out of [0, {}]",
            tick,
            meter.value(),
            max_energy
        );

        for entity in std::iter::once(encounter.player).chain(encounter.enemies.iter().copied()) {
            let combatant = world.get::<Combatant>(entity).unwrap();
            assert!(
                !(combatant.is_attacking(now) && combatant.is_stunned(now)),
                "Tick {}: {:?} attacking and stunned at once",
                tick,
                entity
            );
        }

        for (index, &enemy) in encounter.enemies.iter().enumerate() {
            let dead = world.get::<Combatant>(enemy).unwrap().is_dead;
            assert!(!(dead_seen[index] && !dead), "Tick {}: {:?} came back to life", tick, enemy);
            dead_seen[index] |= dead;
        }

        if encounter.is_finished() {
            assert!(dead_seen.iter().all(|&dead| dead), "Tick {}: finished with enemies alive", tick);
            break;
        }
    }
}

#[test]
fn test_encounter_finishes_only_after_last_enemy() {
    let (mut app, player, first) = create_duel(20.0);
    let second = spawn_enemy(app.world_mut(), Transform::from_xyz(4.0, 0.0, -26.0), player);

    let fire_ultimate = |app: &mut App| {
        app.world_mut().get_mut::<EnergyMeter>(player).unwrap().set(100.0);
        app.world_mut().get_mut::<AttackIntent>(player).unwrap().special_attack_requested = true;
        advance(app.world_mut(), DT);
    };

    fire_ultimate(&mut app);
    assert!(app.world().get::<Combatant>(first).unwrap().is_dead);

    // Первая проверка (через 4s) видит живого врага
    for _ in 0..40 {
        advance(app.world_mut(), DT);
    }
    assert!(!app.world().resource::<EncounterState>().is_finished());

    fire_ultimate(&mut app);
    assert!(app.world().get::<Combatant>(second).unwrap().is_dead);
    let mut finished = 0;
    for _ in 0..40 {
        advance(app.world_mut(), DT);
        finished += app.world_mut().resource_mut::<Events<EncounterFinished>>().drain().count();
    }
    assert!(app.world().resource::<EncounterState>().is_finished());
    assert_eq!(finished, 1);
}

#[test]
fn test_build_simulation_rejects_invalid_config() {
    let mut config = CombatConfig::default();
    config.ultimate.range = -1.0;

    let error = build_simulation(config, StraightLineNavigation).err().unwrap();
    assert!(matches!(error, CombatError::InvalidConfig { field: "ultimate.range", .. }));
}

#[test]
fn test_bare_world_reports_missing_collaborator() {
    let world = World::new();
    let error = ensure_collaborators(&world).unwrap_err();
    assert!(matches!(error, CombatError::MissingCollaborator("navigation oracle")));
}

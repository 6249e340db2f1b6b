//! Scripted host for headless runs.
//!
//! Заменяет движок: двигает врагов по `Locomotion`, генерирует player
//! intents из `DeterministicRng`, направляет камеру на ближайшего живого
//! врага и эмулирует physics overlaps по включённым хитбоксам.
//! Используется headless бинарником и determinism тестами.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{CombatRole, Combatant, EnergyMeter, HitboxId};
use crate::combat::encounter::{EncounterRoster, EncounterState};
use crate::combat::events::{EncounterFinished, FinisherExecuted, HitboxOverlap, HitboxToggled};
use crate::components::{AttackIntent, CameraForward, Enemy, Locomotion};
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::navigation::StraightLineNavigation;
use crate::schedule::advance;
use crate::{build_simulation, spawn_enemy, spawn_player, DeterministicRng};

/// Reach of the player's punch/kick colliders in the scripted arena.
pub const PLAYER_HITBOX_REACH: f32 = 12.0;

/// Chance per tick that the scripted player presses basic attack.
const BASIC_PRESS_CHANCE: f64 = 0.08;

/// Running totals of what the host observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptStats {
    pub ticks: u64,
    pub hitbox_activations: u32,
    pub overlaps_sent: u32,
    pub finishers: u32,
    pub finished_at_tick: Option<u64>,
}

/// Headless encounter: app + handles.
pub struct ScriptedEncounter {
    pub app: App,
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub stats: ScriptStats,
}

impl ScriptedEncounter {
    /// Player at the origin, `enemy_count` enemies scattered on a ring.
    pub fn new(seed: u64, enemy_count: usize, config: CombatConfig) -> Result<Self, CombatError> {
        let mut app = build_simulation(config, StraightLineNavigation)?;
        app.insert_resource(DeterministicRng::new(seed));

        let world = app.world_mut();
        let player = spawn_player(world, Transform::from_translation(Vec3::ZERO));

        let mut enemies = Vec::with_capacity(enemy_count);
        for _ in 0..enemy_count {
            let (angle, radius) = {
                let mut rng = world.resource_mut::<DeterministicRng>();
                (
                    rng.rng.gen_range(0.0..std::f32::consts::TAU),
                    rng.rng.gen_range(20.0..35.0_f32),
                )
            };
            let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
            enemies.push(spawn_enemy(world, Transform::from_translation(position), player));
        }

        Ok(Self {
            app,
            player,
            enemies,
            stats: ScriptStats::default(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.app.world().resource::<EncounterState>().is_finished()
    }

    /// One host frame: collaborators act, then the core ticks.
    pub fn step(&mut self, dt: f32) {
        let player = self.player;
        let world = self.app.world_mut();

        emulate_physics(world, &mut self.stats);
        move_enemies(world, dt);
        aim_camera(world, player);
        press_buttons(world, player);

        advance(world, dt);
        self.stats.ticks += 1;

        let finishers = world.resource_mut::<Events<FinisherExecuted>>().drain().count();
        self.stats.finishers += finishers as u32;
        if world.resource_mut::<Events<EncounterFinished>>().drain().count() > 0 {
            self.stats.finished_at_tick = Some(self.stats.ticks);
        }
    }
}

/// Physics collaborator: every hitbox switched on last tick overlaps whoever
/// stands within its reach.
fn emulate_physics(world: &mut World, stats: &mut ScriptStats) {
    let toggled: Vec<HitboxToggled> = world.resource_mut::<Events<HitboxToggled>>().drain().collect();
    let reach_basic = world.resource::<CombatConfig>().engagement.near_range;
    let reach_special = world.resource::<CombatConfig>().engagement.far_range;

    let mut bodies = world.query::<(Entity, &Transform, &Combatant)>();
    let bodies: Vec<(Entity, Vec3, CombatRole, bool)> = bodies
        .iter(world)
        .map(|(entity, transform, combatant)| (entity, transform.translation, combatant.role, combatant.is_dead))
        .collect();

    for toggle in toggled.into_iter().filter(|toggle| toggle.active) {
        stats.hitbox_activations += 1;
        let Some(&(_, origin, _, _)) = bodies.iter().find(|(entity, ..)| *entity == toggle.entity) else {
            continue;
        };
        let reach = match toggle.hitbox {
            HitboxId::LeftPunch | HitboxId::RightLeg => PLAYER_HITBOX_REACH,
            HitboxId::EnemyBasic => reach_basic,
            HitboxId::EnemySpecial => reach_special,
        };

        for &(victim, position, role, dead) in &bodies {
            if victim == toggle.entity || dead || !toggle.hitbox.category().hurts(role) {
                continue;
            }
            if origin.distance(position) <= reach {
                world.send_event(HitboxOverlap::new(toggle.entity, toggle.hitbox, victim));
                stats.overlaps_sent += 1;
            }
        }
    }
}

/// Navigation agent: walk toward the target at `Locomotion::speed`.
fn move_enemies(world: &mut World, dt: f32) {
    let roster = world.resource::<EncounterRoster>().enemies().to_vec();
    for enemy in roster {
        let (Some(target), Some(speed)) = (
            world.get::<Enemy>(enemy).map(|enemy| enemy.target),
            world.get::<Locomotion>(enemy).map(|locomotion| locomotion.speed),
        ) else {
            continue;
        };
        let Some(goal) = world.get::<Transform>(target).map(|transform| transform.translation) else {
            continue;
        };
        if speed <= 0.0 {
            continue;
        }
        if let Some(mut transform) = world.get_mut::<Transform>(enemy) {
            let to_goal = goal - transform.translation;
            let step = (speed * dt).min(to_goal.length());
            transform.translation += to_goal.normalize_or_zero() * step;
        }
    }
}

/// Camera collaborator: look at the closest living enemy.
fn aim_camera(world: &mut World, player: Entity) {
    let Some(origin) = world.get::<Transform>(player).map(|transform| transform.translation) else {
        return;
    };
    let roster = world.resource::<EncounterRoster>().enemies().to_vec();
    let closest = roster
        .iter()
        .filter(|&&enemy| world.get::<Combatant>(enemy).is_some_and(|combatant| !combatant.is_dead))
        .filter_map(|&enemy| world.get::<Transform>(enemy).map(|transform| transform.translation))
        .min_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)));

    if let (Some(position), Some(mut forward)) = (closest, world.get_mut::<CameraForward>(player)) {
        let direction = (position - origin).normalize_or_zero();
        if direction != Vec3::ZERO {
            forward.0 = direction;
        }
    }
}

/// Input collaborator: random basic presses, ultimate as soon as it is ready.
fn press_buttons(world: &mut World, player: Entity) {
    let ready = world.get::<EnergyMeter>(player).is_some_and(EnergyMeter::is_full);
    let basic = world.resource_mut::<DeterministicRng>().rng.gen_bool(BASIC_PRESS_CHANCE);

    if let Some(mut intent) = world.get_mut::<AttackIntent>(player) {
        intent.basic_attack_requested |= basic && !ready;
        intent.special_attack_requested |= ready;
    }
}

/// Run until the encounter ends or `max_ticks` elapse.
pub fn run_scripted_encounter(
    seed: u64,
    enemy_count: usize,
    max_ticks: u64,
    dt: f32,
) -> Result<ScriptedEncounter, CombatError> {
    let mut encounter = ScriptedEncounter::new(seed, enemy_count, CombatConfig::default())?;
    while encounter.stats.ticks < max_ticks && !encounter.is_finished() {
        encounter.step(dt);
    }
    Ok(encounter)
}

//! Attack starts: player basic attacks (intent-driven) and enemy attack
//! decisions (range bands).

use bevy::prelude::*;

use crate::combat::components::{AttackKind, Combatant, HitboxId};
use crate::combat::encounter::{EncounterRoster, EncounterState};
use crate::combat::events::{AnimationCue, AnimationRequest, PlaybackMode};
use crate::components::{AttackIntent, BasicCombo, Enemy, Player};
use crate::config::CombatConfig;
use crate::schedule::Scheduler;

use super::hitboxes::schedule_hitbox_activation;

/// Enemy attack variant for a given distance to the target.
///
/// `< near` → basic, `< far` → special, otherwise no attack.
pub fn choose_enemy_attack(distance: f32, near_range: f32, far_range: f32) -> Option<AttackKind> {
    if distance < near_range {
        Some(AttackKind::Basic)
    } else if distance < far_range {
        Some(AttackKind::Special)
    } else {
        None
    }
}

/// Система: player basic attack.
///
/// Intent сбрасывается всегда (одно нажатие = максимум одна атака).
pub fn player_basic_attack(
    mut scheduler: Scheduler,
    config: Res<CombatConfig>,
    encounter: Res<EncounterState>,
    mut players: Query<(Entity, &mut AttackIntent, &mut Combatant, &mut BasicCombo), With<Player>>,
    mut animations: EventWriter<AnimationRequest>,
) {
    let now = scheduler.now();

    for (entity, mut intent, mut combatant, mut combo) in players.iter_mut() {
        if !intent.basic_attack_requested {
            continue;
        }
        intent.basic_attack_requested = false;

        if encounter.is_finished() || !combatant.can_start_attack(now, config.player.attack_cooldown) {
            crate::logger::log(&format!("✋ Basic attack ignored ({:?})", combatant.state(now)));
            continue;
        }

        combatant.begin_attack(now, config.player.attack_busy, AttackKind::Basic);
        let hitbox = combo.advance();
        animations.write(AnimationRequest {
            entity,
            cue: AnimationCue::BasicAttack,
            mode: PlaybackMode::Trigger,
        });
        schedule_hitbox_activation(&mut scheduler, entity, hitbox, config.player.basic_hitbox_delay);

        crate::logger::log(&format!("👊 Player {:?} basic attack ({:?})", entity, hitbox));
    }
}

/// Система: enemy attack decisions, in roster (spawn) order.
pub fn enemy_attack_decisions(
    mut scheduler: Scheduler,
    config: Res<CombatConfig>,
    roster: Res<EncounterRoster>,
    mut enemies: Query<(&Transform, &mut Combatant, &Enemy)>,
    targets: Query<&Transform, Without<Enemy>>,
    mut animations: EventWriter<AnimationRequest>,
) {
    let now = scheduler.now();
    let timings = &config.enemy;

    for &entity in roster.enemies() {
        let Ok((transform, mut combatant, enemy)) = enemies.get_mut(entity) else {
            continue;
        };
        if !combatant.can_start_attack(now, timings.attack_cooldown) {
            continue;
        }
        let Ok(target_transform) = targets.get(enemy.target) else {
            continue;
        };

        let distance = transform.translation.distance(target_transform.translation);
        let Some(kind) = choose_enemy_attack(distance, config.engagement.near_range, config.engagement.far_range)
        else {
            continue;
        };

        combatant.begin_attack(now, timings.attack_busy, kind);
        let (cue, delay) = match kind {
            AttackKind::Basic => (AnimationCue::EnemyBasicAttack, timings.basic_hitbox_delay),
            AttackKind::Special => (AnimationCue::EnemySpecialAttack, config.engagement.special_hitbox_delay),
        };
        animations.write(AnimationRequest {
            entity,
            cue,
            mode: PlaybackMode::Trigger,
        });
        schedule_hitbox_activation(&mut scheduler, entity, HitboxId::for_enemy_attack(kind), delay);

        crate::logger::log(&format!(
            "⚔️ Enemy {:?} starts {:?} attack (distance {:.1}m)",
            entity, kind, distance
        ));
    }
}

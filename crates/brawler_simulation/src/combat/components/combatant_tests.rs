//! Tests for Combatant transitions.

#[cfg(test)]
mod tests {
    use super::super::combatant::*;

    #[test]
    fn test_new_combatant_is_idle_and_ready() {
        let enemy = Combatant::enemy();
        assert_eq!(enemy.state(0.0), CombatantState::Idle);
        assert!(enemy.can_start_attack(0.0, 1.5));
        assert!(enemy.active_hitboxes().is_empty());
    }

    #[test]
    fn test_attack_window_and_cooldown() {
        let mut enemy = Combatant::enemy();
        enemy.begin_attack(1.0, 1.0, AttackKind::Basic);

        assert_eq!(enemy.state(1.5), CombatantState::Attacking);
        assert!(!enemy.can_start_attack(1.5, 1.5));

        // Окно закрылось, но cooldown ещё нет (anchor 1.0 + 1.5)
        assert_eq!(enemy.state(2.0), CombatantState::Idle);
        assert!(!enemy.can_start_attack(2.0, 1.5));
        // Strict: now > anchor + cooldown
        assert!(!enemy.can_start_attack(2.5, 1.5));
        assert!(enemy.can_start_attack(2.51, 1.5));
    }

    #[test]
    fn test_stun_clears_hitboxes_and_attack() {
        let mut player = Combatant::player();
        player.begin_attack(0.0, 0.5, AttackKind::Basic);
        assert!(player.activate_hitbox(0.1, HitboxId::LeftPunch));

        // Attacking → hit ignored
        assert!(player.try_stun(0.2, 0.8).is_none());
        assert!(player.is_hitbox_active(HitboxId::LeftPunch));

        // После окна атаки: stun проходит, hitbox'ы сброшены
        let cleared = player.try_stun(0.6, 0.8).unwrap();
        assert_eq!(cleared, vec![HitboxId::LeftPunch]);
        assert_eq!(player.state(0.6), CombatantState::Stunned);
        assert!(player.active_hitboxes().is_empty());

        // Already stunned → ignored, window not extended
        assert!(player.try_stun(1.0, 0.8).is_none());
        assert_eq!(player.stun_window.expiry(), 0.6 + f64::from(0.8f32));
    }

    #[test]
    fn test_attacking_and_stunned_never_both() {
        let mut enemy = Combatant::enemy();
        enemy.try_stun(0.0, 0.3).unwrap();
        // Re-opening an attack while stunned is blocked by can_start_attack,
        // but even a forced begin_attack reports Attacking, never both
        enemy.begin_attack(0.1, 1.0, AttackKind::Special);
        assert!(enemy.is_attacking(0.2));
        assert!(!enemy.is_stunned(0.2));
        assert_eq!(enemy.state(0.2), CombatantState::Attacking);
    }

    #[test]
    fn test_hitbox_activation_requires_attacking() {
        let mut enemy = Combatant::enemy();
        assert!(!enemy.activate_hitbox(0.0, HitboxId::EnemyBasic));

        enemy.begin_attack(0.0, 1.0, AttackKind::Basic);
        assert!(enemy.activate_hitbox(0.25, HitboxId::EnemyBasic));
        assert!(!enemy.activate_hitbox(0.3, HitboxId::EnemyBasic)); // already on

        // Stale callback after the window closed
        assert!(!enemy.activate_hitbox(1.5, HitboxId::EnemySpecial));
        assert!(!enemy.is_hitbox_active(HitboxId::EnemySpecial));
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut enemy = Combatant::enemy();
        enemy.begin_attack(0.0, 1.0, AttackKind::Basic);
        enemy.activate_hitbox(0.1, HitboxId::EnemyBasic);

        assert!(enemy.deactivate_hitbox(HitboxId::EnemyBasic));
        let snapshot = enemy.clone();
        assert!(!enemy.deactivate_hitbox(HitboxId::EnemyBasic));
        assert!(!enemy.deactivate_hitbox(HitboxId::EnemySpecial));
        assert_eq!(enemy.active_hitboxes(), snapshot.active_hitboxes());
        assert_eq!(enemy.attack_window, snapshot.attack_window);
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut enemy = Combatant::enemy();
        enemy.begin_attack(0.0, 1.0, AttackKind::Basic);
        enemy.activate_hitbox(0.1, HitboxId::EnemyBasic);

        let cleared = enemy.kill(0.2).unwrap();
        assert_eq!(cleared, vec![HitboxId::EnemyBasic]);
        assert_eq!(enemy.state(0.2), CombatantState::Dead);

        assert!(enemy.kill(0.3).is_none());
        assert!(enemy.try_stun(5.0, 0.3).is_none());
        assert!(!enemy.can_start_attack(10.0, 0.0));
        enemy.begin_attack(10.0, 1.0, AttackKind::Basic);
        assert!(!enemy.activate_hitbox(10.1, HitboxId::EnemyBasic));
        assert_eq!(enemy.state(10.1), CombatantState::Dead);
    }

    #[test]
    fn test_category_filter() {
        assert!(HitCategory::PlayerAttackHitbox.hurts(CombatRole::Enemy));
        assert!(!HitCategory::PlayerAttackHitbox.hurts(CombatRole::Player));
        assert!(HitCategory::EnemyAttackHitbox.hurts(CombatRole::Player));
        assert_eq!(HitboxId::RightLeg.category(), HitCategory::PlayerAttackHitbox);
        assert_eq!(HitboxId::for_enemy_attack(AttackKind::Special), HitboxId::EnemySpecial);
    }
}

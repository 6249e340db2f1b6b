//! Combatant state machine component.
//!
//! State is derived from window activity, priority Dead → Attacking →
//! Stunned → Approaching → Idle. Attacking and Stunned are never both
//! reported: a hit during an attack is ignored, and a stun force-closes
//! any lingering attack window.

use bevy::prelude::*;

use crate::combat::window::TimedWindow;

/// Which side of the fight a combatant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CombatRole {
    Player,
    Enemy,
}

/// Attack variant (basic = short range, special = long range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AttackKind {
    Basic,
    Special,
}

/// Category carried by overlap events from the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitCategory {
    PlayerAttackHitbox,
    EnemyAttackHitbox,
}

impl HitCategory {
    /// Can a hitbox of this category stun a combatant of `role`?
    pub fn hurts(self, role: CombatRole) -> bool {
        matches!(
            (self, role),
            (HitCategory::PlayerAttackHitbox, CombatRole::Enemy)
                | (HitCategory::EnemyAttackHitbox, CombatRole::Player)
        )
    }
}

/// Named attack hitboxes, resolved at compile time instead of string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitboxId {
    /// Player basic combo, first hit.
    LeftPunch,
    /// Player basic combo, second hit.
    RightLeg,
    EnemyBasic,
    EnemySpecial,
}

impl HitboxId {
    pub fn category(self) -> HitCategory {
        match self {
            HitboxId::LeftPunch | HitboxId::RightLeg => HitCategory::PlayerAttackHitbox,
            HitboxId::EnemyBasic | HitboxId::EnemySpecial => HitCategory::EnemyAttackHitbox,
        }
    }

    /// Enemy hitbox for the given attack variant.
    pub fn for_enemy_attack(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Basic => HitboxId::EnemyBasic,
            AttackKind::Special => HitboxId::EnemySpecial,
        }
    }
}

/// Derived state (not stored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CombatantState {
    Idle,
    /// Enemy only: walking toward its target.
    Approaching,
    Attacking,
    Stunned,
    /// Terminal.
    Dead,
}

/// One combat-capable entity (player or enemy).
///
/// Position and facing live in `Transform` (owned by movement/navigation);
/// this component holds only timing state.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Combatant {
    pub role: CombatRole,
    pub attack_window: TimedWindow,
    pub stun_window: TimedWindow,
    /// Time of the last attack start.
    pub cooldown_anchor: f64,
    pub is_dead: bool,
    /// Set by the approach system (enemies only).
    pub approaching: bool,
    /// Variant of the attack currently (or last) started.
    pub current_attack: Option<AttackKind>,
    active_hitboxes: Vec<HitboxId>,
}

impl Combatant {
    pub fn new(role: CombatRole) -> Self {
        Self {
            role,
            attack_window: TimedWindow::inactive(),
            stun_window: TimedWindow::inactive(),
            cooldown_anchor: f64::NEG_INFINITY,
            is_dead: false,
            approaching: false,
            current_attack: None,
            active_hitboxes: Vec::new(),
        }
    }

    pub fn player() -> Self {
        Self::new(CombatRole::Player)
    }

    pub fn enemy() -> Self {
        Self::new(CombatRole::Enemy)
    }

    pub fn state(&self, now: f64) -> CombatantState {
        if self.is_dead {
            CombatantState::Dead
        } else if self.attack_window.is_active(now) {
            CombatantState::Attacking
        } else if self.stun_window.is_active(now) {
            CombatantState::Stunned
        } else if self.approaching {
            CombatantState::Approaching
        } else {
            CombatantState::Idle
        }
    }

    pub fn is_attacking(&self, now: f64) -> bool {
        !self.is_dead && self.attack_window.is_active(now)
    }

    pub fn is_stunned(&self, now: f64) -> bool {
        !self.is_dead && !self.attack_window.is_active(now) && self.stun_window.is_active(now)
    }

    /// Busy = attacking or stunned (cannot start anything new).
    pub fn is_busy(&self, now: f64) -> bool {
        self.attack_window.is_active(now) || self.stun_window.is_active(now)
    }

    pub fn cooldown_ready(&self, now: f64, cooldown: f32) -> bool {
        now > self.cooldown_anchor + f64::from(cooldown)
    }

    /// Idle → Attacking precondition (minus role-specific range/intent checks).
    pub fn can_start_attack(&self, now: f64, cooldown: f32) -> bool {
        !self.is_dead && !self.is_busy(now) && self.cooldown_ready(now, cooldown)
    }

    /// Open the attack window and anchor the cooldown. Caller checks
    /// `can_start_attack` first.
    pub fn begin_attack(&mut self, now: f64, busy: f32, kind: AttackKind) {
        if self.is_dead {
            return;
        }
        self.attack_window.open(now, busy);
        self.cooldown_anchor = now;
        self.current_attack = Some(kind);
    }

    /// Ordinary hit. Returns the hitboxes that were cleared, or `None` when
    /// the hit is ignored (dead, attacking, already stunned).
    pub fn try_stun(&mut self, now: f64, duration: f32) -> Option<Vec<HitboxId>> {
        if self.is_dead || self.is_busy(now) {
            return None;
        }
        let cleared = self.clear_hitboxes();
        self.stun_window.open(now, duration);
        self.attack_window.close(now);
        self.approaching = false;
        Some(cleared)
    }

    /// Finishing blow. Returns the hitboxes that were cleared, or `None` if
    /// already dead.
    pub fn kill(&mut self, now: f64) -> Option<Vec<HitboxId>> {
        if self.is_dead {
            return None;
        }
        self.is_dead = true;
        self.approaching = false;
        self.attack_window.close(now);
        self.stun_window.close(now);
        Some(self.clear_hitboxes())
    }

    pub fn active_hitboxes(&self) -> &[HitboxId] {
        &self.active_hitboxes
    }

    pub fn is_hitbox_active(&self, hitbox: HitboxId) -> bool {
        self.active_hitboxes.contains(&hitbox)
    }

    /// Allowed only while Attacking; stale requests are ignored.
    /// Returns true if the hitbox went from off to on.
    pub fn activate_hitbox(&mut self, now: f64, hitbox: HitboxId) -> bool {
        if !self.is_attacking(now) || self.active_hitboxes.contains(&hitbox) {
            return false;
        }
        self.active_hitboxes.push(hitbox);
        true
    }

    /// Always allowed, idempotent. Returns true if the hitbox was on.
    pub fn deactivate_hitbox(&mut self, hitbox: HitboxId) -> bool {
        let before = self.active_hitboxes.len();
        self.active_hitboxes.retain(|&h| h != hitbox);
        self.active_hitboxes.len() != before
    }

    pub fn clear_hitboxes(&mut self) -> Vec<HitboxId> {
        std::mem::take(&mut self.active_hitboxes)
    }
}

//! Tunable combat constants.
//!
//! Все длительности в секундах, дистанции в метрах, углы в градусах.
//! Значения по умолчанию взяты из оригинальной сцены.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CombatError;

/// Timing profile for one side of the fight (player or enemies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTimings {
    /// How long an attack keeps the combatant busy.
    pub attack_busy: f32,
    /// Forced idle after an ordinary hit.
    pub stun_duration: f32,
    /// Minimum time between two attack starts.
    pub attack_cooldown: f32,
    /// Delay from attack start to the basic hitbox going live.
    pub basic_hitbox_delay: f32,
}

impl RoleTimings {
    pub fn player() -> Self {
        Self {
            attack_busy: 0.5,
            stun_duration: 0.8,
            attack_cooldown: 0.0,
            basic_hitbox_delay: 0.15,
        }
    }

    pub fn enemy() -> Self {
        Self {
            attack_busy: 1.0,
            stun_duration: 0.3,
            attack_cooldown: 1.5,
            basic_hitbox_delay: 0.25,
        }
    }
}

impl Default for RoleTimings {
    fn default() -> Self {
        Self::enemy()
    }
}

/// Enemy engagement bands and approach tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementTuning {
    /// Below this distance the enemy uses its basic attack.
    pub near_range: f32,
    /// Below this distance (and not near) the enemy uses its special attack.
    pub far_range: f32,
    /// Delay from an enemy special attack start to its hitbox going live.
    /// Player finishers get their timing from `AnimationSignal::StateEntered`.
    pub special_hitbox_delay: f32,
    /// Navigation remaining distance under which the enemy stops walking.
    pub stop_distance: f32,
    pub approach_speed: f32,
    /// Lerp factor for the locomotion blend value, applied once per tick.
    pub blend_rate: f32,
}

impl Default for EngagementTuning {
    fn default() -> Self {
        Self {
            near_range: 8.0,
            far_range: 15.0,
            special_hitbox_delay: 0.45,
            stop_distance: 10.0,
            approach_speed: 15.0,
            blend_rate: 0.5,
        }
    }
}

/// Finishing move (ultimate) tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltimateTuning {
    pub range: f32,
    /// Symmetric half-angle of the view cone around the camera forward.
    pub cone_half_angle_deg: f32,
    /// Player attack-busy window opened by the finisher.
    pub busy_duration: f32,
    /// Distance in front of the player where the victim is staged.
    pub reposition_offset: f32,
    /// Post-death reaction delay per finisher variant (index 0 and 1).
    pub reaction_delays: [f32; 2],
    /// Delay before the encounter completion check runs.
    pub completion_check_delay: f32,
}

impl Default for UltimateTuning {
    fn default() -> Self {
        Self {
            range: 30.0,
            cone_half_angle_deg: 70.0,
            busy_duration: 0.5,
            reposition_offset: 24.0,
            reaction_delays: [1.5, 2.25],
            completion_check_delay: 4.0,
        }
    }
}

/// Player energy meter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyTuning {
    pub max: f32,
    pub gain_per_hit: f32,
    pub loss_per_hit: f32,
}

impl Default for EnergyTuning {
    fn default() -> Self {
        Self {
            max: 100.0,
            gain_per_hit: 17.5,
            loss_per_hit: 10.0,
        }
    }
}

/// Все боевые константы одним ресурсом.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub player: RoleTimings,
    pub enemy: RoleTimings,
    pub engagement: EngagementTuning,
    pub ultimate: UltimateTuning,
    pub energy: EnergyTuning,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player: RoleTimings::player(),
            enemy: RoleTimings::enemy(),
            engagement: EngagementTuning::default(),
            ultimate: UltimateTuning::default(),
            energy: EnergyTuning::default(),
        }
    }
}

impl CombatConfig {
    /// Parse a (possibly partial) RON document; missing fields keep defaults.
    pub fn from_ron(text: &str) -> Result<Self, CombatError> {
        let config: CombatConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CombatError> {
        let durations = [
            ("player.attack_busy", self.player.attack_busy),
            ("player.stun_duration", self.player.stun_duration),
            ("player.attack_cooldown", self.player.attack_cooldown),
            ("player.basic_hitbox_delay", self.player.basic_hitbox_delay),
            ("enemy.attack_busy", self.enemy.attack_busy),
            ("enemy.stun_duration", self.enemy.stun_duration),
            ("enemy.attack_cooldown", self.enemy.attack_cooldown),
            ("enemy.basic_hitbox_delay", self.enemy.basic_hitbox_delay),
            ("engagement.special_hitbox_delay", self.engagement.special_hitbox_delay),
            ("ultimate.busy_duration", self.ultimate.busy_duration),
            ("ultimate.reaction_delays[0]", self.ultimate.reaction_delays[0]),
            ("ultimate.reaction_delays[1]", self.ultimate.reaction_delays[1]),
            ("ultimate.completion_check_delay", self.ultimate.completion_check_delay),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(CombatError::invalid(field, format!("must be a non-negative duration, got {}", value)));
            }
        }

        // NaN не проходит `!(x >= 0)`, бесконечность отсекаем отдельно
        let magnitudes = [
            ("engagement.stop_distance", self.engagement.stop_distance),
            ("engagement.approach_speed", self.engagement.approach_speed),
            ("ultimate.reposition_offset", self.ultimate.reposition_offset),
            ("energy.gain_per_hit", self.energy.gain_per_hit),
            ("energy.loss_per_hit", self.energy.loss_per_hit),
        ];
        for (field, value) in magnitudes {
            if !value.is_finite() || !(value >= 0.0) {
                return Err(CombatError::invalid(field, format!("must be finite and non-negative, got {}", value)));
            }
        }

        let engagement = &self.engagement;
        if !(engagement.near_range > 0.0) {
            return Err(CombatError::invalid("engagement.near_range", "must be positive"));
        }
        if !(engagement.far_range > engagement.near_range) {
            return Err(CombatError::invalid(
                "engagement.far_range",
                format!("must exceed near_range ({})", engagement.near_range),
            ));
        }
        if !(0.0..=1.0).contains(&engagement.blend_rate) {
            return Err(CombatError::invalid("engagement.blend_rate", "must be within [0, 1]"));
        }

        if !(self.ultimate.range > 0.0) {
            return Err(CombatError::invalid("ultimate.range", "must be positive"));
        }
        let angle = self.ultimate.cone_half_angle_deg;
        if !(angle > 0.0 && angle <= 180.0) {
            return Err(CombatError::invalid("ultimate.cone_half_angle_deg", "must be within (0, 180]"));
        }

        if !(self.energy.max > 0.0) || !self.energy.max.is_finite() {
            return Err(CombatError::invalid("energy.max", "must be positive"));
        }

        Ok(())
    }
}

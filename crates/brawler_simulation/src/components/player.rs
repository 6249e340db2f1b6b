//! Player input-facing components.
//!
//! Пишутся input/camera коллабораторами, читаются ядром.

use bevy::prelude::*;

use crate::combat::components::HitboxId;

/// Edge-triggered attack intents from the input collaborator.
///
/// The core clears each flag once it has looked at it: one press is at most
/// one action, even when the press was rejected.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AttackIntent {
    pub basic_attack_requested: bool,
    pub special_attack_requested: bool,
}

impl AttackIntent {
    pub fn basic() -> Self {
        Self {
            basic_attack_requested: true,
            special_attack_requested: false,
        }
    }

    pub fn special() -> Self {
        Self {
            basic_attack_requested: false,
            special_attack_requested: true,
        }
    }
}

/// Camera forward vector (world space), used for the ultimate view cone.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraForward(pub Vec3);

impl Default for CameraForward {
    fn default() -> Self {
        Self(Vec3::NEG_Z)
    }
}

/// Basic-attack combo: alternates the punch and kick hitboxes.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct BasicCombo {
    step: u32,
}

impl BasicCombo {
    /// Hitbox for the next basic attack, then advance the combo.
    pub fn advance(&mut self) -> HitboxId {
        let hitbox = if self.step % 2 == 0 {
            HitboxId::LeftPunch
        } else {
            HitboxId::RightLeg
        };
        self.step = self.step.wrapping_add(1);
        hitbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_alternates_punch_and_kick() {
        let mut combo = BasicCombo::default();
        assert_eq!(combo.advance(), HitboxId::LeftPunch);
        assert_eq!(combo.advance(), HitboxId::RightLeg);
        assert_eq!(combo.advance(), HitboxId::LeftPunch);
    }

    #[test]
    fn test_camera_forward_defaults_to_transform_forward() {
        assert_eq!(CameraForward::default().0, *Transform::default().forward());
    }
}

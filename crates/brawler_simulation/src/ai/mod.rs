//! Enemy AI: approach the target via the navigation oracle.
//!
//! Намеренно простое поведение: "идти к цели, остановиться в радиусе".
//! Решения об атаке принимает combat (range bands), не AI.

use bevy::prelude::*;

pub mod approach;

// Re-export основных типов
pub use approach::{blend_toward, decide_approach, drive_enemy_approach, ApproachDecision};

use crate::schedule::{CombatSet, CombatTick};

/// AI Plugin
///
/// Регистрирует approach систему в `CombatSet::Locomotion` (после hit
/// resolution, до attack decisions), чтобы stun этого тика уже учитывался.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(CombatTick, drive_enemy_approach.in_set(CombatSet::Locomotion));
    }
}

//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Player / Enemy markers
//! - player: input intents, camera forward
//! - movement: enemy locomotion, player movement gate
//!
//! Боевые компоненты (Combatant, EnergyMeter) живут в crate::combat.

pub mod actor;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;

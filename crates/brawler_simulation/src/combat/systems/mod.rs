//! Combat systems (combatant state machine, per-tick logic)

pub mod attacks;
pub mod hitboxes;
pub mod hits;
pub mod movement_gate;
pub mod ultimate;


// Re-export all systems
pub use attacks::*;
pub use hitboxes::*;
pub use hits::resolve_hitbox_overlaps;
pub use movement_gate::*;
pub use ultimate::*;

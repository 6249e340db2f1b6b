//! Combat components

pub mod combatant;
pub mod energy;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod combatant_tests;
#[cfg(test)]
mod energy_tests;

// Re-export all components
pub use combatant::*;
pub use energy::*;

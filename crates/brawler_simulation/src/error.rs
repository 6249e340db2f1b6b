//! Startup errors.
//!
//! Only configuration and collaborator binding can fail. Everything that
//! happens mid-encounter (stale callbacks, hits on dead or busy combatants,
//! ultimates without a target) is an ordinary no-op, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombatError {
    /// A tuning value is out of its allowed range.
    #[error("invalid combat config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// RON text could not be parsed into a `CombatConfig`.
    #[error("failed to parse combat config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// A required external collaborator is not bound to the world.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

impl CombatError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

//! Error types for the metrics engine.
//!
//! Only the primary entity of a request produces an error. Row-level
//! lookup failures inside tables and aggregates are skipped instead.

use thiserror::Error;

/// Result type alias using [`LabError`].
pub type Result<T> = std::result::Result<T, LabError>;

/// Top-level error type for engine requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    /// No standard defender could be resolved from the selection or roster.
    #[error("No standard unit available")]
    MissingStandard,

    /// A unit referenced by the selection does not exist.
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    /// A class id does not resolve in the class catalog.
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// A weapon id does not resolve in the weapon catalog.
    #[error("Weapon not found: {0}")]
    WeaponNotFound(String),

    /// A stage id does not resolve.
    #[error("Stage not found: {0}")]
    StageNotFound(String),

    /// The attack could not be simulated (attacker class, defender class
    /// or attacker weapon missing).
    #[error("Simulation impossible")]
    SimulationFailed,
}

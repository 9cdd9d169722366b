//! Error types for planning operations.

use thiserror::Error;

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The container template is malformed.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// A box specification is malformed.
    #[error("Invalid box spec: {0}")]
    InvalidSpec(String),

    /// A box's raw dimensions exceed the container's on some axis. Checked
    /// once, against the original container bounds, before any placement
    /// work: such a box can never be placed no matter how many containers
    /// are opened. Rotation does not relax this gate.
    #[error("Box '{name}' is larger than the container")]
    Oversized {
        /// Name of the offending box spec.
        name: String,
    },

    /// A closed container failed an invariant check (overlap, containment,
    /// or weight capacity). Unreachable with a correct engine; treated as a
    /// fatal defect rather than a recoverable condition.
    #[error("Internal invariant violated: {0}")]
    Internal(String),
}

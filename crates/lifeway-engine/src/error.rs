//! Error type for the evolution engine.

/// Errors that can occur while driving the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A caller-supplied parameter was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The run's progress sink went away and the run was abandoned.
    #[error("run cancelled: {0}")]
    Cancelled(String),
}

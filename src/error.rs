//! Error types for the simulation's input and configuration surface.
//!
//! The simulation itself is total; errors only come from values handed in
//! by the host (pointer coordinates, container sizes, tuning files).

/// Main error type for Shrimp Catch.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tuning parse error: {0}")]
    Tuning(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject NaN and infinite values before they reach entity state.
pub(crate) fn ensure_finite(what: &str, value: f32) -> Result<f32, GameError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GameError::InvalidInput(format!("{what} must be finite, got {value}")))
    }
}

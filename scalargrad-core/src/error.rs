use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Cannot rewind graph to checkpoint {checkpoint}: graph only holds {len} nodes")]
    InvalidCheckpoint { checkpoint: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parameter initialization failed: {0}")]
    InitError(String),
}

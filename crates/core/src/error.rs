use thiserror::Error;

pub type AdcueResult<T> = Result<T, AdcueError>;

#[derive(Error, Debug)]
pub enum AdcueError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dimension mismatch: expected context of length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid action index {index} (action space has {n_actions} actions)")]
    InvalidAction { index: usize, n_actions: usize },

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

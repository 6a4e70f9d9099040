use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for the boundary layers: loading deposit exports and
/// reading or writing configuration. The aggregation core never fails.
#[derive(Debug, Error)]
pub enum SavingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SavingsError>;

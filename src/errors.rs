use thiserror::Error;

/// Error type shared by the entry store, controllers and configuration.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Not a number: `{0}`")]
    InvalidNumericInput(String),
    #[error("No entry #{} (the list holds {len})", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;

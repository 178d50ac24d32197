use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON file: {file_path:?}, detail: {source}")]
    JsonParse {
        file_path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("invalid tx_priority value: {label}")]
    InvalidEnumValue { label: String },

    #[error("either 'manual' must be true or 'interval_secs' must be set")]
    MissingTrigger,

    #[error("value {value} for '{field}' is out of range")]
    ValueOutOfRange { field: &'static str, value: i64 },

    #[error("input validation error: {0}")]
    InputValidation(String),

    #[error("{context}: {source}")]
    Client {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

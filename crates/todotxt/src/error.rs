/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, TodoTxtError>;

/// Errors reported by the codec.
///
/// Malformed line segments are never errors: the grammar leaves whatever it
/// cannot recognize in the task text.
#[derive(Debug, thiserror::Error)]
pub enum TodoTxtError {
    /// Value handed to the stringifier is not a task or a collection of tasks.
    #[error("Unexpected input: {0}")]
    InvalidInput(String),

    /// Value cannot be represented as a task date.
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    /// Named character encoding is not supported.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Codec options could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Task-shaped JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

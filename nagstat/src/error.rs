//! Error types for status parsing, querying and command submission.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error at line {line} in {block} block: {message}")]
    Parse {
        line: usize,
        block: String,
        message: String,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Action name {0} is not implemented")]
    UnknownAction(String),

    #[error("Action {action} requires {}", fields.join(", "))]
    MissingFields { action: String, fields: Vec<String> },

    #[error("Action {action} field {field} must be a single line")]
    MultilineField { action: String, field: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

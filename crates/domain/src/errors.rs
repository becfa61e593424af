use thiserror::Error;

/// Why a single FTL query line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("Expected 12 fields, found {found}")]
    FieldCount { found: usize },

    #[error("Field '{field}' is not an integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Failed to connect to FTL at {endpoint}: {reason}")]
    ConnectFailed { endpoint: String, reason: String },

    #[error("Failed to write command to FTL: {0}")]
    CommandWrite(String),

    #[error("FTL stream read failed: {0}")]
    StreamRead(String),

    #[error("Invalid query line: {0}")]
    InvalidQueryLine(#[from] QueryParseError),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

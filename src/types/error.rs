use thiserror::Error;

/// fridgetrack error types
#[derive(Error, Debug)]
pub enum FridgetrackError {
    /// Remote table store call failed
    #[error("store error: {0}")]
    Store(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Caller-supplied data failed boundary validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Mutation rejected: the parent event is closed
    #[error("event {0} is closed")]
    EventClosed(String),

    /// Mutation rejected: the log entry belongs to another user
    #[error("log entry {0} is owned by another user")]
    NotOwner(String),
}

/// Result type alias for fridgetrack
pub type Result<T> = std::result::Result<T, FridgetrackError>;

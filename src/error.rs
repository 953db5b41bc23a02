use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SnipError {
    /// The backing store could not be reached or refused the operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// No row matched a point lookup.
    #[error("Row not found: {0}")]
    NotFound(Uuid),

    /// A write collided with an existing row (e.g. a duplicate
    /// `(owner_id, name, version)` insert). Callers may retry.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A row id supplied by a caller could not be parsed.
    #[error("Invalid row reference: {0}")]
    InvalidReference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnipError>;

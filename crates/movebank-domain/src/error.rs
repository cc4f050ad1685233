use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed delimited response: {0}")]
    MalformedResponse(String),

    #[error("Invalid acceleration record: {0}")]
    InvalidAccelerationRecord(String),

    #[error("Document write error: {0}")]
    DocumentWriteError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

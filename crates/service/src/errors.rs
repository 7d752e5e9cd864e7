use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Payload or identifier could not be accepted.
    #[error("validation error: {0}")]
    Validation(String),
    /// Identifier is not structurally valid, so no lookup was attempted.
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Anything the persistence layer reports, connectivity loss included.
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn store(err: impl std::fmt::Display) -> Self { Self::Store(err.to_string()) }
}

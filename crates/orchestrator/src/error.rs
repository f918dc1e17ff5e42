use astro_core::CalculationError;
use database::DatabaseError;
use thiserror::Error;

/// Service-layer failures. The HTTP surface maps these onto status codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request payload is malformed or violates a business rule.
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist (or is soft-deleted).
    #[error("{0}")]
    NotFound(String),

    /// The caller does not own the addressed entity.
    #[error("{0}")]
    Forbidden(String),

    /// The operation conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    #[error("astrology calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    /// Row-missing storage errors surface as not-found, everything else as
    /// an internal database failure.
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => {
                ServiceError::NotFound(format!("{entity} {id} not found"))
            }
            other => ServiceError::Database(other),
        }
    }
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

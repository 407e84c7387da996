//! Errors surfaced by repository implementations.

use thiserror::Error;

use crate::domain::product::DataValidationError;
use crate::domain::types::TypeConstraintError;

/// Errors produced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Failed to check a connection out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The underlying database operation failed.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A supplied or stored value failed domain validation.
    #[error(transparent)]
    Validation(#[from] DataValidationError),
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Validation(value.into())
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

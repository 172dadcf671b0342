//! Business logic sitting between the HTTP routes and the record store.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod apartments;

/// Failures reported by service functions.
///
/// "Not found" is not an error at this layer: lookups return `Option`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("image storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

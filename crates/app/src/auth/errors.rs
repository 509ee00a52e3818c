//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("user not found")]
    UnknownUser,

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::NotFound => Self::NotFound,
            StoreFault::MissingReference => Self::UnknownUser,
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::Duplicate
            | StoreFault::MissingValue
            | StoreFault::Constraint
            | StoreFault::Other => Self::Sql(error),
        }
    }
}

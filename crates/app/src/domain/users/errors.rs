//! Users service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    UnknownUser,

    #[error("organization not found")]
    UnknownOrganization,

    #[error("invalid user data")]
    InvalidData,

    #[error("credit amount out of range")]
    InvalidCredits(#[from] TryFromIntError),

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::NotFound => Self::UnknownUser,
            StoreFault::Duplicate => Self::AlreadyExists,
            StoreFault::MissingReference => Self::UnknownOrganization,
            StoreFault::MissingValue | StoreFault::Constraint => Self::InvalidData,
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::Other => Self::Sql(error),
        }
    }
}

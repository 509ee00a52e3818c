//! Organizations service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum OrganizationsServiceError {
    #[error("organization already exists")]
    AlreadyExists,

    #[error("organization not found")]
    UnknownOrganization,

    #[error("invalid organization data")]
    InvalidData,

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrganizationsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::NotFound => Self::UnknownOrganization,
            StoreFault::Duplicate => Self::AlreadyExists,
            StoreFault::MissingValue | StoreFault::Constraint => Self::InvalidData,
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::MissingReference | StoreFault::Other => Self::Sql(error),
        }
    }
}

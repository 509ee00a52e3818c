//! Offers service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum OffersServiceError {
    #[error("offer not found")]
    UnknownOffer,

    #[error("organization not found")]
    UnknownOrganization,

    #[error("organization is not a shop")]
    NotAShop,

    #[error("code already exists for this offer")]
    DuplicateCode,

    #[error("invalid offer data")]
    InvalidData,

    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OffersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::NotFound | StoreFault::MissingReference => Self::UnknownOffer,
            StoreFault::Duplicate => Self::DuplicateCode,
            StoreFault::MissingValue | StoreFault::Constraint => Self::InvalidData,
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::Other => Self::Sql(error),
        }
    }
}

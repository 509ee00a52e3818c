//! Discounts service errors.

use lojal::reductions::ReductionError;
use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum DiscountsServiceError {
    #[error("offer not found")]
    UnknownOffer,

    #[error("invalid discount")]
    InvalidDiscount(#[from] ReductionError),

    #[error("discount expiry must be in the future")]
    ExpiryNotInFuture,

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DiscountsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::NotFound | StoreFault::MissingReference => Self::UnknownOffer,
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::Duplicate
            | StoreFault::MissingValue
            | StoreFault::Constraint
            | StoreFault::Other => Self::Sql(error),
        }
    }
}

//! Transactions service errors.

use lojal::{pricing::PricingError, reductions::ReductionError};
use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("user not found")]
    UnknownUser,

    #[error("organization not found")]
    UnknownOrganization,

    #[error("organization is not a shop")]
    NotAShop,

    #[error("copied discount is invalid")]
    InvalidDiscount(#[from] ReductionError),

    #[error("price could not be computed")]
    Pricing(#[from] PricingError),

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TransactionsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::Unavailable | StoreFault::Contention => Self::StoreUnavailable(error),
            StoreFault::NotFound
            | StoreFault::Duplicate
            | StoreFault::MissingReference
            | StoreFault::MissingValue
            | StoreFault::Constraint
            | StoreFault::Other => Self::Sql(error),
        }
    }
}

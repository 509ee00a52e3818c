//! Purchases service errors.

use lojal::{
    codes::QuantityError, pricing::PricingError, purchases::PurchaseOutcome,
    reductions::ReductionError,
};
use sqlx::Error;
use thiserror::Error;

use crate::database::{StoreFault, classify};

/// Why a purchase request was refused before any store was touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidPurchase {
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    Total(#[from] PricingError),
}

#[derive(Debug, Error)]
pub enum PurchasesServiceError {
    #[error("invalid purchase request")]
    InvalidRequest(#[from] InvalidPurchase),

    #[error("user not found")]
    UnknownUser,

    #[error("offer not found")]
    UnknownOffer,

    #[error("active discount is malformed")]
    InvalidDiscount(#[from] ReductionError),

    #[error("requested {requested} codes but only {available} are available")]
    InsufficientCodes { requested: u32, available: u64 },

    #[error("purchase costs {required} credits but the balance is {balance}")]
    InsufficientCredits { required: u64, balance: u64 },

    #[error("codes kept changing while being allocated")]
    AllocationConflict,

    #[error("purchase exceeded its time budget")]
    TimedOut,

    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl PurchasesServiceError {
    /// How the failed purchase is reported.
    #[must_use]
    pub const fn outcome(&self) -> PurchaseOutcome {
        match self {
            Self::InvalidRequest(_) | Self::InvalidDiscount(_) => PurchaseOutcome::Rejected,
            Self::UnknownUser | Self::UnknownOffer => PurchaseOutcome::UnknownParty,
            Self::InsufficientCodes { .. } => PurchaseOutcome::InsufficientCodes,
            Self::InsufficientCredits { .. } => PurchaseOutcome::InsufficientCredits,
            Self::AllocationConflict => PurchaseOutcome::Conflict,
            Self::TimedOut => PurchaseOutcome::TimedOut,
            Self::StoreUnavailable(_) | Self::Sql(_) => PurchaseOutcome::StoreFailure,
        }
    }
}

impl From<QuantityError> for PurchasesServiceError {
    fn from(error: QuantityError) -> Self {
        Self::InvalidRequest(error.into())
    }
}

impl From<PricingError> for PurchasesServiceError {
    fn from(error: PricingError) -> Self {
        Self::InvalidRequest(error.into())
    }
}

impl From<Error> for PurchasesServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            StoreFault::Duplicate | StoreFault::Contention => Self::AllocationConflict,
            StoreFault::Unavailable => Self::StoreUnavailable(error),
            StoreFault::NotFound
            | StoreFault::MissingReference
            | StoreFault::MissingValue
            | StoreFault::Constraint
            | StoreFault::Other => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_an_invalid_request() {
        let error = PurchasesServiceError::from(QuantityError::Zero);

        assert!(
            matches!(
                error,
                PurchasesServiceError::InvalidRequest(InvalidPurchase::Quantity(QuantityError::Zero))
            ),
            "expected InvalidRequest, got {error:?}"
        );
    }

    #[test]
    fn insufficient_credits_reports_its_own_outcome() {
        let error = PurchasesServiceError::InsufficientCredits {
            required: 500,
            balance: 100,
        };

        assert_eq!(error.outcome(), PurchaseOutcome::InsufficientCredits);
    }

    #[test]
    fn pool_timeout_is_store_unavailable() {
        let error = PurchasesServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, PurchasesServiceError::StoreUnavailable(_)),
            "expected StoreUnavailable, got {error:?}"
        );
    }
}

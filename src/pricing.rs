//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{codes::Quantity, reductions::Reduction};

/// Errors that can occur while pricing an offer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Percentage arithmetic could not be represented.
    #[error("percentage reduction overflowed")]
    PercentConversion,

    /// `unit price * quantity` does not fit in a credit balance.
    #[error("total for {quantity} units at {unit_price} overflows")]
    TotalOverflow {
        /// Per-unit price.
        unit_price: u64,

        /// Requested units.
        quantity: u32,
    },
}

/// Price of a purchase before any credits move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Price charged for each code.
    pub unit_price: u64,

    /// Number of codes.
    pub quantity: Quantity,

    /// Amount debited from the buyer.
    pub total: u64,
}

/// Effective price of an offer under an optional reduction.
///
/// Percentages round half away from zero before they are subtracted, and the result never goes
/// below zero.
///
/// # Errors
///
/// - [`PricingError::PercentConversion`]: the percentage could not be applied.
pub fn price(base: u64, reduction: Option<&Reduction>) -> Result<u64, PricingError> {
    match reduction {
        None => Ok(base),
        Some(Reduction::Percent(percent)) => {
            let taken = percent_of(*percent, base)?;

            Ok(base.saturating_sub(taken))
        }
        Some(Reduction::Absolute(amount)) => Ok(base.saturating_sub(*amount)),
    }
}

/// Price `quantity` codes of an offer.
///
/// # Errors
///
/// - [`PricingError::PercentConversion`]: the percentage could not be applied.
/// - [`PricingError::TotalOverflow`]: the total does not fit in a signed 64-bit balance.
pub fn quote(
    base: u64,
    reduction: Option<&Reduction>,
    quantity: Quantity,
) -> Result<Quote, PricingError> {
    let unit_price = price(base, reduction)?;

    let total = unit_price
        .checked_mul(u64::from(quantity.get()))
        .filter(|total| i64::try_from(*total).is_ok())
        .ok_or(PricingError::TotalOverflow {
            unit_price,
            quantity: quantity.get(),
        })?;

    Ok(Quote {
        unit_price,
        quantity,
        total,
    })
}

fn percent_of(percent: u8, base: u64) -> Result<u64, PricingError> {
    let applied = Decimal::from(base)
        .checked_mul(Decimal::from(percent))
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::PercentConversion)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::PercentConversion)
}

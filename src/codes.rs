//! Codes
//!
//! Redeemable codes belong to an offer and are handed out earliest expiry first. A code is
//! allocatable while it is still available and has not yet expired; expired codes stay in the
//! pool but are never picked.

use std::{fmt, num::NonZeroU32};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

/// Largest number of codes a single purchase may request.
pub const MAX_QUANTITY: u32 = 100;

/// Number of codes requested by a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

/// Errors raised for an unusable purchase quantity.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Fewer than one code requested.
    #[error("quantity must be at least 1")]
    Zero,

    /// More codes than a single purchase may take.
    #[error("quantity {0} exceeds the limit of {MAX_QUANTITY}")]
    TooLarge(u32),
}

impl Quantity {
    /// A single code.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Validate a requested quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when `value` is zero or above [`MAX_QUANTITY`].
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        if value > MAX_QUANTITY {
            return Err(QuantityError::TooLarge(value));
        }

        NonZeroU32::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    /// Validate a signed quantity as received from a client.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for zero or negative values.
    pub fn from_signed(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::Zero);
        }

        let value = u32::try_from(value).unwrap_or(u32::MAX);

        Self::new(value)
    }

    /// Number of codes.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Number of codes as a collection length.
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.get()).unwrap_or(usize::MAX)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Something that can be handed out as a code.
pub trait Allocatable {
    /// Code number, unique within its offer.
    fn number(&self) -> i64;

    /// When the code stops being redeemable.
    fn expiry(&self) -> Timestamp;

    /// Whether the code has not been redeemed yet.
    fn is_available(&self) -> bool;

    /// Whether the code may be allocated at `now`.
    fn is_allocatable(&self, now: Timestamp) -> bool {
        self.is_available() && self.expiry() > now
    }
}

/// Errors raised while choosing codes.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Not enough allocatable codes remain.
    #[error("requested {requested} codes but only {available} are available")]
    InsufficientCodes {
        /// Codes requested.
        requested: u32,

        /// Allocatable codes found.
        available: usize,
    },
}

/// Choose which codes a purchase receives.
///
/// Unavailable and expired candidates are ignored. The rest are ordered by expiry, then code
/// number, and the first `quantity` are returned. Nothing is returned unless the full quantity
/// can be met.
///
/// # Errors
///
/// - [`AllocationError::InsufficientCodes`]: fewer than `quantity` candidates are allocatable.
pub fn select_for_allocation<C, I>(
    candidates: I,
    quantity: Quantity,
    now: Timestamp,
) -> Result<SmallVec<[C; 4]>, AllocationError>
where
    C: Allocatable,
    I: IntoIterator<Item = C>,
{
    let mut allocatable: SmallVec<[C; 4]> = candidates
        .into_iter()
        .filter(|candidate| candidate.is_allocatable(now))
        .collect();

    if allocatable.len() < quantity.as_usize() {
        return Err(AllocationError::InsufficientCodes {
            requested: quantity.get(),
            available: allocatable.len(),
        });
    }

    allocatable.sort_by(|a, b| {
        a.expiry()
            .cmp(&b.expiry())
            .then_with(|| a.number().cmp(&b.number()))
    });
    allocatable.truncate(quantity.as_usize());

    Ok(allocatable)
}

//! Discount Data

use jiff::Timestamp;
use lojal::reductions::Reduction;

/// New Discount Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscount {
    pub name: Option<String>,
    pub reduction: Reduction,

    /// Must lie in the future when the discount is set.
    pub expiry: Timestamp,
}

//! Discount Models

use jiff::Timestamp;
use lojal::reductions::{Reduction, ReductionError};

use crate::domain::{
    discounts::records::{DiscountId, DiscountRecord},
    offers::records::OfferId,
};

/// Discount Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    pub id: DiscountId,
    pub offer: OfferId,
    pub name: Option<String>,
    pub reduction: Reduction,
    pub expiry: Timestamp,
}

impl Discount {
    /// Active while its expiry lies after `point_in_time`.
    #[must_use]
    pub fn is_active(&self, point_in_time: Timestamp) -> bool {
        self.expiry > point_in_time
    }
}

impl TryFrom<DiscountRecord> for Discount {
    type Error = ReductionError;

    fn try_from(record: DiscountRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            offer: record.offer,
            name: record.name,
            reduction: record.reduction.parse()?,
            expiry: record.expiry,
        })
    }
}

//! Discount Records

use jiff::Timestamp;

use crate::{domain::offers::records::OfferId, ids::TypedId};

/// Discount Id
pub type DiscountId = TypedId<DiscountRecord>;

/// Discount row as stored, with the reduction still in its text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRecord {
    pub id: DiscountId,
    pub offer: OfferId,
    pub name: Option<String>,
    pub reduction: String,
    pub expiry: Timestamp,
    pub created_at: Timestamp,
}

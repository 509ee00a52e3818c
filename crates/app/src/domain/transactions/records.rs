//! Transaction Records

use jiff::Timestamp;

use crate::{
    domain::{discounts::records::DiscountId, offers::records::OfferId},
    ids::TypedId,
};

/// Transaction Id
pub type TransactionId = TypedId<TransactionRecord>;

/// Transaction row joined with its receipt copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub login: String,
    pub shop: String,

    /// Price paid for the code.
    pub price: u64,

    pub created_at: Timestamp,
    pub code: i64,
    pub expiry: Timestamp,
    pub offer: OfferCopy,
    pub discount: Option<DiscountCopy>,
}

/// Offer as copied at its first purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCopy {
    pub id: OfferId,
    pub name: String,
    pub price: u64,
    pub category: Option<String>,
}

/// Discount as copied when a code was bought under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountCopy {
    pub id: DiscountId,
    pub name: Option<String>,
    pub reduction: String,
}

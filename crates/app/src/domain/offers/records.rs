//! Offer Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Offer Id
pub type OfferId = TypedId<Offer>;

/// Offer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub id: OfferId,

    /// Owning shop.
    pub organization: String,

    pub name: String,

    /// Base price in credits, before any discount.
    pub price: u64,

    pub category: Option<String>,

    pub active: bool,

    pub created_at: Timestamp,
}

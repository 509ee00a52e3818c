//! Offer Data

use jiff::Timestamp;

/// New Offer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    /// Shop publishing the offer.
    pub organization: String,

    pub name: String,

    /// Base price in credits.
    pub price: u64,

    pub category: Option<String>,

    pub active: bool,
}

/// New Code Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCode {
    /// Code number, unique within the offer.
    pub code: i64,

    pub expiry: Timestamp,
}

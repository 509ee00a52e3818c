//! Purchase Data

use crate::domain::offers::records::OfferId;

/// Purchase request as received from a buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Login of the authenticated buyer.
    pub buyer: String,

    pub offer: OfferId,

    /// Requested number of codes. Validated before anything is read.
    pub quantity: i64,
}

impl PurchaseRequest {
    /// Request for a single code.
    #[must_use]
    pub fn single(buyer: impl Into<String>, offer: OfferId) -> Self {
        Self {
            buyer: buyer.into(),
            offer,
            quantity: 1,
        }
    }
}

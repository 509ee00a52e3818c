//! Purchase Models

use jiff::Timestamp;
use serde::Serialize;
use smallvec::SmallVec;

use crate::domain::{offers::records::OfferId, purchases::records::IntentUuid};

/// Completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub intent: IntentUuid,
    pub offer: OfferId,

    /// Price charged for each code.
    pub unit_price: u64,

    /// Amount debited.
    pub total: u64,

    /// Buyer's balance after the debit.
    pub balance: u64,

    /// Codes in allocation order, earliest expiry first.
    pub codes: SmallVec<[PurchasedCode; 4]>,
}

/// Code handed to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchasedCode {
    pub code: i64,
    pub expiry: Timestamp,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Stale intents claimed.
    pub claimed: usize,

    /// Intents whose codes were released.
    pub compensated: usize,

    /// Inventory codes made available again.
    pub released_codes: u64,
}

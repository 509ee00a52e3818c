//! Purchases
//!
//! A purchase walks through a fixed sequence of states. Any non-terminal state may abort, in
//! which case both stores roll back.

use std::fmt;

/// Stage a purchase has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseState {
    /// Buyer and offer are being checked.
    Validating,

    /// Unit price and total are being computed.
    Pricing,

    /// Codes are being locked and flipped to redeemed.
    Allocating,

    /// The buyer's credits are being debited.
    Debiting,

    /// Receipt rows are being written to the ledger.
    Materializing,

    /// Both stores are committing.
    Committing,

    /// The purchase completed.
    Done,

    /// The purchase failed and was rolled back.
    Aborted,
}

impl PurchaseState {
    /// State that follows this one on success. Terminal states return themselves.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Validating => Self::Pricing,
            Self::Pricing => Self::Allocating,
            Self::Allocating => Self::Debiting,
            Self::Debiting => Self::Materializing,
            Self::Materializing => Self::Committing,
            Self::Committing | Self::Done => Self::Done,
            Self::Aborted => Self::Aborted,
        }
    }

    /// Lowercase label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Pricing => "pricing",
            Self::Allocating => "allocating",
            Self::Debiting => "debiting",
            Self::Materializing => "materializing",
            Self::Committing => "committing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for PurchaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a purchase ended, as reported to metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseOutcome {
    /// Codes were delivered.
    Completed,

    /// Request was malformed.
    Rejected,

    /// Buyer or offer does not exist.
    UnknownParty,

    /// Not enough codes remained.
    InsufficientCodes,

    /// Buyer could not afford the total.
    InsufficientCredits,

    /// Concurrent allocations kept conflicting.
    Conflict,

    /// The purchase exceeded its time budget.
    TimedOut,

    /// A store failed.
    StoreFailure,
}

impl PurchaseOutcome {
    /// Metric label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::UnknownParty => "unknown_party",
            Self::InsufficientCodes => "insufficient_codes",
            Self::InsufficientCredits => "insufficient_credits",
            Self::Conflict => "conflict",
            Self::TimedOut => "timed_out",
            Self::StoreFailure => "store_failure",
        }
    }
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Purchase Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use lojal::codes::Allocatable;
use thiserror::Error;

use crate::{domain::offers::records::OfferId, uuids::TypedUuid};

/// Purchase Intent Uuid
pub type IntentUuid = TypedUuid<PurchaseIntent>;

/// Where an intent stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentStatus {
    /// Recorded; codes may already be redeemed under it.
    Pending,

    /// Receipt written. Its codes belong to the buyer.
    Completed,

    /// Gave up before any inventory change was committed.
    Aborted,

    /// Claimed for release of its codes.
    Compensating,

    /// Codes released.
    Compensated,
}

impl IntentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
            Self::Compensating => "compensating",
            Self::Compensated => "compensated",
        }
    }

    /// Whether redeemed codes may still be released for this intent.
    #[must_use]
    pub const fn is_unsettled(self) -> bool {
        matches!(self, Self::Pending | Self::Compensating)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown intent status {0:?}")]
pub struct UnknownIntentStatus(pub String);

impl FromStr for IntentStatus {
    type Err = UnknownIntentStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "aborted" => Ok(Self::Aborted),
            "compensating" => Ok(Self::Compensating),
            "compensated" => Ok(Self::Compensated),
            other => Err(UnknownIntentStatus(other.to_string())),
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase Intent Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseIntent {
    pub uuid: IntentUuid,
    pub login: String,
    pub offer: OfferId,
    pub quantity: u32,
    pub status: IntentStatus,

    /// Code numbers the intent completed with. Empty until completed.
    pub codes: Vec<i64>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Inventory code row considered for allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub offer: OfferId,
    pub code: i64,
    pub available: bool,
    pub expiry: Timestamp,
}

impl Allocatable for CodeRecord {
    fn number(&self) -> i64 {
        self.code
    }

    fn expiry(&self) -> Timestamp {
        self.expiry
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

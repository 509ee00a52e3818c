//! Organization Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role an organization plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationKind {
    /// Publishes offers and owns code pools.
    Shop,

    /// Its users buy codes with credits.
    Client,
}

impl OrganizationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Client => "client",
        }
    }

    #[must_use]
    pub const fn is_shop(self) -> bool {
        matches!(self, Self::Shop)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown organization kind {0:?}")]
pub struct UnknownOrganizationKind(pub String);

impl FromStr for OrganizationKind {
    type Err = UnknownOrganizationKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "shop" => Ok(Self::Shop),
            "client" => Ok(Self::Client),
            other => Err(UnknownOrganizationKind(other.to_string())),
        }
    }
}

impl fmt::Display for OrganizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Unique organization name.
    pub name: String,

    /// Shop or client.
    pub kind: OrganizationKind,

    /// Registration timestamp.
    pub created_at: Timestamp,
}

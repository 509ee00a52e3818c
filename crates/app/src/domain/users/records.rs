//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Manager,
    Worker,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Manager => "manager",
            Self::Worker => "worker",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "administrator" => Ok(Self::Administrator),
            "manager" => Ok(Self::Manager),
            "worker" => Ok(Self::Worker),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub login: String,
    pub organization: String,
    pub role: Role,

    /// Stored balance; absent until first set.
    pub credits: Option<u64>,

    /// When the balance last changed.
    pub latest_update: Option<Timestamp>,

    pub created_at: Timestamp,
}

impl User {
    /// Spendable credits.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.credits.unwrap_or(0)
    }
}

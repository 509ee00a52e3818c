//! User Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod balance;
pub(crate) mod credits;

/// Balance Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BalanceResponse {
    pub login: String,

    /// Spendable credits; 0 for a user whose balance was never set
    pub credits: u64,
}

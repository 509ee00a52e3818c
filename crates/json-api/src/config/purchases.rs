//! Purchase Config

use std::time::Duration;

use clap::Args;

/// Purchase timing and reconciliation settings.
#[derive(Debug, Args)]
pub struct PurchasesConfig {
    /// Time budget of one purchase in milliseconds.
    #[arg(long, env = "PURCHASE_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub purchase_timeout_ms: u64,

    /// Interval between reconciliation passes in seconds.
    #[arg(long, env = "RECONCILE_INTERVAL_SECONDS", default_value_t = 60_u64)]
    pub reconcile_interval_seconds: u64,

    /// Age in seconds after which an unsettled purchase is reconciled.
    #[arg(long, env = "RECONCILE_STALE_AFTER_SECONDS", default_value_t = 300_u64)]
    pub reconcile_stale_after_seconds: u64,
}

impl PurchasesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.purchase_timeout_ms)
    }

    /// Never shorter than one second.
    #[must_use]
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_interval_seconds.max(1))
    }

    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.reconcile_stale_after_seconds)
    }
}

//! Purchase reconciler
//!
//! Purchases that stop between redeeming codes and completing their intent (a crash, a timeout,
//! a lost ledger connection) leave the intent unsettled. The reconciler periodically claims
//! such intents once they are older than any purchase could still be running, and returns
//! their codes to the pool.

use std::{future::Future, time::Duration};

use jiff::{SignedDuration, Timestamp};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    database::Stores,
    domain::purchases::{
        compensation::Compensator, errors::PurchasesServiceError, models::ReconcileReport,
        repositories::PgIntentsRepository,
    },
};

/// Intents claimed per pass.
pub const DEFAULT_BATCH: i64 = 100;

#[derive(Debug, Clone)]
pub struct PurchaseReconciler {
    stores: Stores,
    stale_after: SignedDuration,
    batch: i64,
    intents: PgIntentsRepository,
    compensator: Compensator,
}

impl PurchaseReconciler {
    /// `stale_after` must exceed the purchase time budget, or running purchases could lose
    /// their codes.
    #[must_use]
    pub fn new(stores: Stores, stale_after: SignedDuration) -> Self {
        Self {
            compensator: Compensator::new(stores.clone()),
            stores,
            stale_after,
            batch: DEFAULT_BATCH,
            intents: PgIntentsRepository::new(),
        }
    }

    #[must_use]
    pub fn with_batch(mut self, batch: i64) -> Self {
        self.batch = batch;
        self
    }

    /// Claims and compensates intents left unsettled since before `now - stale_after`.
    ///
    /// # Errors
    ///
    /// Returns an error when stale intents cannot be claimed. Failures compensating a single
    /// intent are logged and leave that intent for the next pass.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, now: Timestamp) -> Result<ReconcileReport, PurchasesServiceError> {
        let stale_before = now.checked_sub(self.stale_after).unwrap_or(Timestamp::MIN);

        let mut ledger = self.stores.ledger.begin().await?;

        let claimed = self
            .intents
            .claim_stale_intents(&mut ledger, stale_before, now, self.batch)
            .await?;

        ledger.commit().await?;

        let mut report = ReconcileReport {
            claimed: claimed.len(),
            ..ReconcileReport::default()
        };

        for intent in claimed {
            match self.compensator.compensate(intent.uuid).await {
                Ok(Some(released)) => {
                    report.compensated += 1;
                    report.released_codes += released;
                }
                Ok(None) => {}
                Err(error) => {
                    error!(intent = %intent.uuid, %error, "could not compensate intent");
                }
            }
        }

        if report.claimed > 0 {
            warn!(
                claimed = report.claimed,
                compensated = report.compensated,
                released_codes = report.released_codes,
                "reconciled stale purchases"
            );
        }

        Ok(report)
    }

    /// Reconciles every `interval` until `shutdown` resolves.
    pub async fn run(self, interval: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        info!(?interval, stale_after = %self.stale_after, "reconciler started");

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("reconciler stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(error) = self.reconcile(Timestamp::now()).await {
                        error!(%error, "reconciliation pass failed");
                    } else {
                        debug!("reconciliation pass finished");
                    }
                }
            }
        }
    }
}

//! Releasing codes held by intents that never completed.

use jiff::Timestamp;
use tracing::{info, instrument, warn};

use crate::{
    database::Stores,
    domain::purchases::{
        errors::PurchasesServiceError,
        records::IntentUuid,
        repositories::{PgCodesRepository, PgIntentsRepository},
    },
};

#[derive(Debug, Clone)]
pub(crate) struct Compensator {
    stores: Stores,
    codes: PgCodesRepository,
    intents: PgIntentsRepository,
}

impl Compensator {
    #[must_use]
    pub(crate) fn new(stores: Stores) -> Self {
        Self {
            stores,
            codes: PgCodesRepository::new(),
            intents: PgIntentsRepository::new(),
        }
    }

    /// Returns every code redeemed under `intent` to the pool and marks the intent
    /// compensated.
    ///
    /// The intent is moved to `compensating` first, which waits out any ledger transaction
    /// still completing it. Returns `None` when the intent had already settled, in which case
    /// nothing is released.
    #[instrument(skip(self), fields(intent = %intent))]
    pub(crate) async fn compensate(
        &self,
        intent: IntentUuid,
    ) -> Result<Option<u64>, PurchasesServiceError> {
        let mut ledger = self.stores.ledger.begin().await?;

        let claimed = self
            .intents
            .begin_compensation(&mut ledger, intent, Timestamp::now())
            .await?;

        ledger.commit().await?;

        if !claimed {
            info!("intent already settled");

            return Ok(None);
        }

        let mut inventory = self.stores.inventory.begin().await?;

        let released = self.codes.release_codes(&mut inventory, intent).await?;

        inventory.commit().await?;

        let mut ledger = self.stores.ledger.begin().await?;

        self.intents
            .finish_compensation(&mut ledger, intent, Timestamp::now())
            .await?;

        ledger.commit().await?;

        warn!(released, "intent compensated");

        Ok(Some(released))
    }
}

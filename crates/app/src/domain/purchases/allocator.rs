//! Code allocation inside a purchase's inventory transaction.

use jiff::Timestamp;
use lojal::codes::{Allocatable, AllocationError, Quantity, select_for_allocation};
use smallvec::SmallVec;
use sqlx::{Acquire, Postgres, Transaction};
use tracing::debug;

use crate::domain::{
    offers::{records::OfferId, repository::PgOffersRepository},
    purchases::{
        errors::PurchasesServiceError,
        records::{CodeRecord, IntentUuid},
        repositories::PgCodesRepository,
    },
};

/// Attempts made before a purchase gives up with [`PurchasesServiceError::AllocationConflict`].
pub(crate) const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Default)]
pub(crate) struct CodeAllocator {
    codes: PgCodesRepository,
    offers: PgOffersRepository,
}

impl CodeAllocator {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            codes: PgCodesRepository::new(),
            offers: PgOffersRepository::new(),
        }
    }

    /// Redeems `quantity` codes of `offer` under `intent`.
    ///
    /// Each attempt runs in its own savepoint. The chosen rows stay locked until the enclosing
    /// transaction ends, and rolling that transaction back returns them to the pool.
    pub(crate) async fn allocate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        quantity: Quantity,
        intent: IntentUuid,
        now: Timestamp,
    ) -> Result<SmallVec<[CodeRecord; 4]>, PurchasesServiceError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let mut savepoint = Acquire::begin(&mut **tx).await?;

            let candidates = self
                .codes
                .lock_candidates(&mut savepoint, offer, quantity, now)
                .await?;

            let selected = match select_for_allocation(candidates, quantity, now) {
                Ok(selected) => selected,
                Err(AllocationError::InsufficientCodes { requested, .. }) => {
                    let available = self
                        .offers
                        .count_available_codes(&mut savepoint, offer, now)
                        .await?;

                    if available < u64::from(requested) {
                        return Err(PurchasesServiceError::InsufficientCodes {
                            requested,
                            available,
                        });
                    }

                    debug!(attempt, available, "candidate codes taken while waiting for locks");

                    savepoint.rollback().await?;

                    continue;
                }
            };

            let numbers: SmallVec<[i64; 4]> = selected.iter().map(Allocatable::number).collect();

            let redeemed = self
                .codes
                .redeem_codes(&mut savepoint, offer, &numbers, intent, now)
                .await?;

            if redeemed.len() == numbers.len() {
                savepoint.commit().await?;

                return Ok(selected);
            }

            debug!(
                attempt,
                expected = numbers.len(),
                redeemed = redeemed.len(),
                "conditional redeem missed codes"
            );

            savepoint.rollback().await?;
        }

        Err(PurchasesServiceError::AllocationConflict)
    }
}

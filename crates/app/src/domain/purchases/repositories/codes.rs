//! Inventory code pool writes.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use lojal::codes::Quantity;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    offers::records::OfferId,
    purchases::records::{CodeRecord, IntentUuid},
};

const LOCK_CANDIDATES_SQL: &str = include_str!("../sql/lock_candidates.sql");
const REDEEM_CODES_SQL: &str = include_str!("../sql/redeem_codes.sql");
const RELEASE_CODES_SQL: &str = include_str!("../sql/release_codes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCodesRepository;

impl PgCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Row-locks up to `quantity` allocatable codes, earliest expiry first.
    ///
    /// Rows redeemed by a concurrent transaction while this one waited for the lock are dropped
    /// from the result, so fewer rows than exist may come back.
    pub(crate) async fn lock_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        quantity: Quantity,
        now: Timestamp,
    ) -> Result<Vec<CodeRecord>, sqlx::Error> {
        query_as::<Postgres, CodeRecord>(LOCK_CANDIDATES_SQL)
            .bind(offer.into_i64())
            .bind(SqlxTimestamp::from(now))
            .bind(i64::from(quantity.get()))
            .fetch_all(&mut **tx)
            .await
    }

    /// Flips the given codes to redeemed under `intent`, skipping any that are no longer
    /// allocatable. Returns the codes actually flipped.
    pub(crate) async fn redeem_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        codes: &[i64],
        intent: IntentUuid,
        now: Timestamp,
    ) -> Result<Vec<i64>, sqlx::Error> {
        query_scalar::<Postgres, i64>(REDEEM_CODES_SQL)
            .bind(offer.into_i64())
            .bind(codes)
            .bind(intent.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }

    /// Makes every code redeemed under `intent` available again.
    pub(crate) async fn release_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RELEASE_CODES_SQL)
            .bind(intent.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            offer: OfferId::from_i64(row.try_get("offer_id")?),
            code: row.try_get("code")?,
            available: row.try_get("available")?,
            expiry: row.try_get::<SqlxTimestamp, _>("expiry")?.to_jiff(),
        })
    }
}

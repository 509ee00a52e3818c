//! Ledger purchase intents.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    offers::records::OfferId,
    purchases::records::{IntentStatus, IntentUuid, PurchaseIntent},
};

const CREATE_INTENT_SQL: &str = include_str!("../sql/create_intent.sql");
const FIND_INTENT_SQL: &str = include_str!("../sql/find_intent.sql");
const COMPLETE_INTENT_SQL: &str = include_str!("../sql/complete_intent.sql");
const ABORT_INTENT_SQL: &str = include_str!("../sql/abort_intent.sql");
const BEGIN_COMPENSATION_SQL: &str = include_str!("../sql/begin_compensation.sql");
const FINISH_COMPENSATION_SQL: &str = include_str!("../sql/finish_compensation.sql");
const CLAIM_STALE_INTENTS_SQL: &str = include_str!("../sql/claim_stale_intents.sql");

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewIntent<'a> {
    pub uuid: IntentUuid,
    pub login: &'a str,
    pub offer: OfferId,
    pub quantity: u32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIntentsRepository;

impl PgIntentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_intent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: &NewIntent<'_>,
    ) -> Result<PurchaseIntent, sqlx::Error> {
        query_as::<Postgres, PurchaseIntent>(CREATE_INTENT_SQL)
            .bind(intent.uuid.into_uuid())
            .bind(intent.login)
            .bind(intent.offer.into_i64())
            .bind(i64::from(intent.quantity))
            .bind(SqlxTimestamp::from(intent.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_intent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
    ) -> Result<Option<PurchaseIntent>, sqlx::Error> {
        query_as::<Postgres, PurchaseIntent>(FIND_INTENT_SQL)
            .bind(intent.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Completes a pending intent. `false` means it was no longer pending.
    pub(crate) async fn complete_intent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
        codes: &[i64],
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(COMPLETE_INTENT_SQL)
            .bind(intent.into_uuid())
            .bind(codes)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn abort_intent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(ABORT_INTENT_SQL)
            .bind(intent.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Moves a pending or compensating intent to compensating. `false` means the intent has
    /// settled and owns no releasable codes.
    pub(crate) async fn begin_compensation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(BEGIN_COMPENSATION_SQL)
            .bind(intent.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(crate) async fn finish_compensation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        intent: IntentUuid,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(FINISH_COMPENSATION_SQL)
            .bind(intent.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Claims unsettled intents last touched before `stale_before`, skipping rows another
    /// transaction holds.
    pub(crate) async fn claim_stale_intents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        stale_before: Timestamp,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<PurchaseIntent>, sqlx::Error> {
        query_as::<Postgres, PurchaseIntent>(CLAIM_STALE_INTENTS_SQL)
            .bind(SqlxTimestamp::from(stale_before))
            .bind(SqlxTimestamp::from(now))
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseIntent {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<IntentStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let quantity: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: IntentUuid::from_uuid(row.try_get("uuid")?),
            login: row.try_get("login")?,
            offer: OfferId::from_i64(row.try_get("offer_id")?),
            quantity,
            status,
            codes: row.try_get("codes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

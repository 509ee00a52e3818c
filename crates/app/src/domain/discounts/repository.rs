//! Discounts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    discounts::{
        data::NewDiscount,
        records::{DiscountId, DiscountRecord},
    },
    offers::records::OfferId,
};

const FIND_ACTIVE_DISCOUNT_SQL: &str = include_str!("sql/find_active_discount.sql");
const RETIRE_ACTIVE_DISCOUNTS_SQL: &str = include_str!("sql/retire_active_discounts.sql");
const CREATE_DISCOUNT_SQL: &str = include_str!("sql/create_discount.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountsRepository;

impl PgDiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_active_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<Option<DiscountRecord>, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(FIND_ACTIVE_DISCOUNT_SQL)
            .bind(offer.into_i64())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Moves the expiry of every active discount of the offer to `now`.
    pub(crate) async fn retire_active_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RETIRE_ACTIVE_DISCOUNTS_SQL)
            .bind(offer.into_i64())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        discount: &NewDiscount,
    ) -> Result<DiscountRecord, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(CREATE_DISCOUNT_SQL)
            .bind(offer.into_i64())
            .bind(discount.name.as_deref())
            .bind(discount.reduction.to_string())
            .bind(SqlxTimestamp::from(discount.expiry))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: DiscountId::from_i64(row.try_get("id")?),
            offer: OfferId::from_i64(row.try_get("offer_id")?),
            name: row.try_get("name")?,
            reduction: row.try_get("reduction")?,
            expiry: row.try_get::<SqlxTimestamp, _>("expiry")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

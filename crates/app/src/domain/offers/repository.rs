//! Offers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::offers::{
    data::{NewCode, NewOffer},
    records::{Offer, OfferId},
};

const FIND_OFFER_SQL: &str = include_str!("sql/find_offer.sql");
const LOCK_OFFER_SQL: &str = include_str!("sql/lock_offer.sql");
const CREATE_OFFER_SQL: &str = include_str!("sql/create_offer.sql");
const INSERT_CODE_SQL: &str = include_str!("sql/insert_code.sql");
const COUNT_AVAILABLE_CODES_SQL: &str = include_str!("sql/count_available_codes.sql");

/// Inventory-side offer and code pool queries.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
    ) -> Result<Option<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(FIND_OFFER_SQL)
            .bind(offer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Row-locks the offer until the transaction ends.
    pub(crate) async fn lock_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
    ) -> Result<Option<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(LOCK_OFFER_SQL)
            .bind(offer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: &NewOffer,
        price: i64,
    ) -> Result<Offer, sqlx::Error> {
        query_as::<Postgres, Offer>(CREATE_OFFER_SQL)
            .bind(&offer.organization)
            .bind(&offer.name)
            .bind(price)
            .bind(offer.category.as_deref())
            .bind(offer.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        code: NewCode,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_CODE_SQL)
            .bind(offer.into_i64())
            .bind(code.code)
            .bind(SqlxTimestamp::from(code.expiry))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Codes that are still available and unexpired at `point_in_time`.
    pub(crate) async fn count_available_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_AVAILABLE_CODES_SQL)
            .bind(offer.into_i64())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Offer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: OfferId::from_i64(row.try_get("id")?),
            organization: row.try_get("organization")?,
            name: row.try_get("name")?,
            price,
            category: row.try_get("category")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

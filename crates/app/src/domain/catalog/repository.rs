//! Catalog Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    discounts::records::{DiscountId, DiscountRecord},
    offers::records::{Offer, OfferId},
};

const LIST_CATALOG_ENTRIES_SQL: &str = include_str!("sql/list_catalog_entries.sql");
const FIND_CATALOG_ENTRY_SQL: &str = include_str!("sql/find_catalog_entry.sql");

/// An offer joined with the discount active at read time.
#[derive(Debug, Clone)]
pub(crate) struct CatalogEntry {
    pub offer: Offer,
    pub discount: Option<DiscountRecord>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        query_as::<Postgres, CatalogEntry>(LIST_CATALOG_ENTRIES_SQL)
            .bind(organization)
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        query_as::<Postgres, CatalogEntry>(FIND_CATALOG_ENTRY_SQL)
            .bind(offer.into_i64())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let offer = Offer::from_row(row)?;

        let discount = match row.try_get::<Option<i64>, _>("discount_id")? {
            Some(id) => Some(DiscountRecord {
                id: DiscountId::from_i64(id),
                offer: offer.id,
                name: row.try_get("discount_name")?,
                reduction: row.try_get("discount_reduction")?,
                expiry: row
                    .try_get::<SqlxTimestamp, _>("discount_expiry")?
                    .to_jiff(),
                created_at: row
                    .try_get::<SqlxTimestamp, _>("discount_created_at")?
                    .to_jiff(),
            }),
            None => None,
        };

        Ok(Self { offer, discount })
    }
}

//! Transactions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    discounts::records::DiscountId,
    offers::records::OfferId,
    transactions::records::{DiscountCopy, OfferCopy, TransactionId, TransactionRecord},
};

const LIST_USER_TRANSACTIONS_SQL: &str = include_str!("sql/list_user_transactions.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Newest first.
    pub(crate) async fn list_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(LIST_USER_TRANSACTIONS_SQL)
            .bind(login)
            .fetch_all(&mut **tx)
            .await
    }

    /// Newest first, optionally restricted to one shop.
    pub(crate) async fn list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: Option<&str>,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(LIST_TRANSACTIONS_SQL)
            .bind(shop)
            .fetch_all(&mut **tx)
            .await
    }
}

fn credits(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount = match row.try_get::<Option<i64>, _>("discount_id")? {
            Some(id) => Some(DiscountCopy {
                id: DiscountId::from_i64(id),
                name: row.try_get("discount_name")?,
                reduction: row.try_get("discount_reduction")?,
            }),
            None => None,
        };

        Ok(Self {
            id: TransactionId::from_i64(row.try_get("id")?),
            login: row.try_get("login")?,
            shop: row.try_get("shop")?,
            price: credits(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            code: row.try_get("code")?,
            expiry: row.try_get::<SqlxTimestamp, _>("code_expiry")?.to_jiff(),
            offer: OfferCopy {
                id: OfferId::from_i64(row.try_get("offer_id")?),
                name: row.try_get("offer_name")?,
                price: credits(row, "offer_price")?,
                category: row.try_get("offer_category")?,
            },
            discount,
        })
    }
}

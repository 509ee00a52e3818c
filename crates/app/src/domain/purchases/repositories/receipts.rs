//! Ledger receipt copies.
//!
//! Offer and discount copies are written once and then left alone, so a later purchase of the
//! same offer keeps the first copy.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::domain::{
    discounts::{models::Discount, records::DiscountId},
    offers::records::{Offer, OfferId},
    purchases::records::IntentUuid,
};

const COPY_OFFER_SQL: &str = include_str!("../sql/copy_offer.sql");
const COPY_DISCOUNT_SQL: &str = include_str!("../sql/copy_discount.sql");
const COPY_CODE_SQL: &str = include_str!("../sql/copy_code.sql");
const RECORD_TRANSACTION_SQL: &str = include_str!("../sql/record_transaction.sql");

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewTransaction<'a> {
    pub login: &'a str,
    pub shop: &'a str,
    pub offer: OfferId,
    pub code: i64,
    pub price: i64,
    pub intent: IntentUuid,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReceiptsRepository;

impl PgReceiptsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn copy_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: &Offer,
        price: i64,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(COPY_OFFER_SQL)
            .bind(offer.id.into_i64())
            .bind(&offer.organization)
            .bind(&offer.name)
            .bind(price)
            .bind(offer.category.as_deref())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn copy_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: &Discount,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(COPY_DISCOUNT_SQL)
            .bind(discount.id.into_i64())
            .bind(discount.offer.into_i64())
            .bind(discount.name.as_deref())
            .bind(discount.reduction.to_string())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn copy_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferId,
        code: i64,
        discount: Option<DiscountId>,
        expiry: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(COPY_CODE_SQL)
            .bind(offer.into_i64())
            .bind(code)
            .bind(discount.map(DiscountId::into_i64))
            .bind(SqlxTimestamp::from(expiry))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn record_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: &NewTransaction<'_>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(RECORD_TRANSACTION_SQL)
            .bind(transaction.login)
            .bind(transaction.shop)
            .bind(transaction.offer.into_i64())
            .bind(transaction.code)
            .bind(transaction.price)
            .bind(transaction.intent.into_uuid())
            .bind(SqlxTimestamp::from(transaction.created_at))
            .fetch_one(&mut **tx)
            .await
    }
}

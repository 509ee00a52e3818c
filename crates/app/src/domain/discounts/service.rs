//! Discounts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::{
        discounts::{
            data::NewDiscount, errors::DiscountsServiceError, models::Discount,
            repository::PgDiscountsRepository,
        },
        offers::{records::OfferId, repository::PgOffersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgDiscountsService {
    inventory: Db,
    discounts: PgDiscountsRepository,
    offers: PgOffersRepository,
}

impl PgDiscountsService {
    #[must_use]
    pub fn new(inventory: Db) -> Self {
        Self {
            inventory,
            discounts: PgDiscountsRepository::new(),
            offers: PgOffersRepository::new(),
        }
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    #[instrument(skip(self, discount), fields(offer = %offer, reduction = %discount.reduction))]
    async fn set_discount(
        &self,
        offer: OfferId,
        discount: NewDiscount,
    ) -> Result<Discount, DiscountsServiceError> {
        let now = Timestamp::now();

        if discount.expiry <= now {
            return Err(DiscountsServiceError::ExpiryNotInFuture);
        }

        let mut tx = self.inventory.begin().await?;

        // Serializes concurrent discount changes for the same offer.
        self.offers
            .lock_offer(&mut tx, offer)
            .await?
            .ok_or(DiscountsServiceError::UnknownOffer)?;

        let retired = self
            .discounts
            .retire_active_discounts(&mut tx, offer, now)
            .await?;

        let record = self
            .discounts
            .create_discount(&mut tx, offer, &discount)
            .await?;

        tx.commit().await?;

        info!(retired, discount = %record.id, "discount set");

        Ok(Discount::try_from(record)?)
    }

    #[instrument(skip(self))]
    async fn clear_discount(&self, offer: OfferId) -> Result<u64, DiscountsServiceError> {
        let mut tx = self.inventory.begin().await?;

        self.offers
            .lock_offer(&mut tx, offer)
            .await?
            .ok_or(DiscountsServiceError::UnknownOffer)?;

        let retired = self
            .discounts
            .retire_active_discounts(&mut tx, offer, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(retired, "discount cleared");

        Ok(retired)
    }

    async fn active_discount(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<Option<Discount>, DiscountsServiceError> {
        let mut tx = self.inventory.begin().await?;

        self.offers
            .find_offer(&mut tx, offer)
            .await?
            .ok_or(DiscountsServiceError::UnknownOffer)?;

        let record = self
            .discounts
            .find_active_discount(&mut tx, offer, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(record.map(Discount::try_from).transpose()?)
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Makes `discount` the offer's active discount, retiring any previous one.
    async fn set_discount(
        &self,
        offer: OfferId,
        discount: NewDiscount,
    ) -> Result<Discount, DiscountsServiceError>;

    /// Retires the offer's active discount. Returns how many discounts were retired.
    async fn clear_discount(&self, offer: OfferId) -> Result<u64, DiscountsServiceError>;

    /// The discount active for the offer at `point_in_time`, if any.
    async fn active_discount(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<Option<Discount>, DiscountsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use lojal::reductions::Reduction;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_offer};

    use super::*;

    fn in_days(days: i64) -> Result<Timestamp, jiff::Error> {
        Timestamp::now().checked_add(SignedDuration::from_hours(days * 24))
    }

    #[tokio::test]
    async fn set_discount_becomes_active() -> TestResult {
        let ctx = TestContext::new().await;
        let offer = create_offer(&ctx, "Corner Bakery", 1000).await?;

        let discount = ctx
            .discounts
            .set_discount(
                offer.id,
                NewDiscount {
                    name: Some("Spring".to_string()),
                    reduction: Reduction::Percent(25),
                    expiry: in_days(3)?,
                },
            )
            .await?;

        let active = ctx
            .discounts
            .active_discount(offer.id, Timestamp::now())
            .await?;

        assert_eq!(active, Some(discount));

        Ok(())
    }

    #[tokio::test]
    async fn setting_a_discount_retires_the_previous_one() -> TestResult {
        let ctx = TestContext::new().await;
        let offer = create_offer(&ctx, "Corner Bakery", 1000).await?;

        let first = ctx
            .discounts
            .set_discount(
                offer.id,
                NewDiscount {
                    name: None,
                    reduction: Reduction::Percent(10),
                    expiry: in_days(30)?,
                },
            )
            .await?;

        let second = ctx
            .discounts
            .set_discount(
                offer.id,
                NewDiscount {
                    name: None,
                    reduction: Reduction::Absolute(100),
                    expiry: in_days(1)?,
                },
            )
            .await?;

        let active: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM discounts WHERE offer_id = $1 AND expiry > now() ORDER BY id",
        )
        .bind(offer.id.into_i64())
        .fetch_all(ctx.inventory.pool())
        .await?;

        let kept: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM discounts WHERE id = $1")
            .bind(first.id.into_i64())
            .fetch_one(ctx.inventory.pool())
            .await?;

        assert_eq!(active, vec![second.id.into_i64()]);
        assert_eq!(kept, 1, "retired discounts are kept");

        Ok(())
    }

    #[tokio::test]
    async fn clear_discount_leaves_offer_undiscounted() -> TestResult {
        let ctx = TestContext::new().await;
        let offer = create_offer(&ctx, "Corner Bakery", 1000).await?;

        ctx.discounts
            .set_discount(
                offer.id,
                NewDiscount {
                    name: None,
                    reduction: Reduction::Percent(50),
                    expiry: in_days(2)?,
                },
            )
            .await?;

        let retired = ctx.discounts.clear_discount(offer.id).await?;
        let active = ctx
            .discounts
            .active_discount(offer.id, Timestamp::now())
            .await?;

        assert_eq!(retired, 1);
        assert!(active.is_none(), "expected no active discount, got {active:?}");

        Ok(())
    }

    #[tokio::test]
    async fn past_expiry_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let offer = create_offer(&ctx, "Corner Bakery", 1000).await?;

        let result = ctx
            .discounts
            .set_discount(
                offer.id,
                NewDiscount {
                    name: None,
                    reduction: Reduction::Percent(50),
                    expiry: in_days(-1)?,
                },
            )
            .await;

        assert!(
            matches!(result, Err(DiscountsServiceError::ExpiryNotInFuture)),
            "expected ExpiryNotInFuture, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn discount_on_unknown_offer_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.discounts.clear_discount(OfferId::from_i64(999)).await;

        assert!(
            matches!(result, Err(DiscountsServiceError::UnknownOffer)),
            "expected UnknownOffer, got {result:?}"
        );

        Ok(())
    }
}

//! Offers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    database::Stores,
    domain::{
        offers::{
            data::{NewCode, NewOffer},
            errors::OffersServiceError,
            records::{Offer, OfferId},
            repository::PgOffersRepository,
        },
        organizations::repository::PgOrganizationsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOffersService {
    stores: Stores,
    offers: PgOffersRepository,
    organizations: PgOrganizationsRepository,
}

impl PgOffersService {
    #[must_use]
    pub fn new(stores: Stores) -> Self {
        Self {
            stores,
            offers: PgOffersRepository::new(),
            organizations: PgOrganizationsRepository::new(),
        }
    }
}

#[async_trait]
impl OffersService for PgOffersService {
    #[instrument(skip(self, offer), fields(organization = %offer.organization))]
    async fn create_offer(&self, offer: NewOffer) -> Result<Offer, OffersServiceError> {
        if offer.name.trim().is_empty() {
            return Err(OffersServiceError::InvalidData);
        }

        let price = i64::try_from(offer.price)?;

        let mut ledger = self.stores.ledger.begin().await?;

        let organization = self
            .organizations
            .find_organization(&mut ledger, &offer.organization)
            .await?
            .ok_or(OffersServiceError::UnknownOrganization)?;

        ledger.commit().await?;

        if !organization.kind.is_shop() {
            return Err(OffersServiceError::NotAShop);
        }

        let mut inventory = self.stores.inventory.begin().await?;

        let created = self
            .offers
            .create_offer(&mut inventory, &offer, price)
            .await
            .map_err(|error| match OffersServiceError::from(error) {
                // The shop is registered in the ledger but was never mirrored.
                OffersServiceError::UnknownOffer => OffersServiceError::UnknownOrganization,
                other => other,
            })?;

        inventory.commit().await?;

        info!(offer = %created.id, "offer created");

        Ok(created)
    }

    async fn get_offer(&self, offer: OfferId) -> Result<Offer, OffersServiceError> {
        let mut tx = self.stores.inventory.begin().await?;

        let found = self
            .offers
            .find_offer(&mut tx, offer)
            .await?
            .ok_or(OffersServiceError::UnknownOffer)?;

        tx.commit().await?;

        Ok(found)
    }

    #[instrument(skip(self, codes), fields(codes = codes.len()))]
    async fn add_codes(&self, offer: OfferId, codes: Vec<NewCode>) -> Result<u64, OffersServiceError> {
        if codes.is_empty() {
            return Err(OffersServiceError::InvalidData);
        }

        let mut tx = self.stores.inventory.begin().await?;

        self.offers
            .find_offer(&mut tx, offer)
            .await?
            .ok_or(OffersServiceError::UnknownOffer)?;

        let mut added = 0_u64;

        for code in codes {
            self.offers.insert_code(&mut tx, offer, code).await?;
            added += 1;
        }

        tx.commit().await?;

        info!(added, "codes added");

        Ok(added)
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Publishes a new offer for a shop.
    async fn create_offer(&self, offer: NewOffer) -> Result<Offer, OffersServiceError>;

    /// Retrieves an offer as stored in the inventory.
    async fn get_offer(&self, offer: OfferId) -> Result<Offer, OffersServiceError>;

    /// Adds codes to an offer's pool. Either every code is added or none is.
    async fn add_codes(&self, offer: OfferId, codes: Vec<NewCode>) -> Result<u64, OffersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::domain::catalog::service::CatalogService;

    use crate::test::{
        TestContext,
        helpers::{create_client_with_user, create_offer, create_shop},
    };

    use super::*;

    #[tokio::test]
    async fn create_offer_for_shop() -> TestResult {
        let ctx = TestContext::new().await;

        create_shop(&ctx, "Corner Bakery").await?;

        let offer = ctx
            .offers
            .create_offer(NewOffer {
                organization: "Corner Bakery".to_string(),
                name: "Free croissant".to_string(),
                price: 300,
                category: Some("Food".to_string()),
                active: true,
            })
            .await?;

        let found = ctx.offers.get_offer(offer.id).await?;

        assert_eq!(found, offer);
        assert_eq!(found.price, 300);
        assert_eq!(found.category.as_deref(), Some("Food"));

        Ok(())
    }

    #[tokio::test]
    async fn create_offer_for_client_organization_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        create_client_with_user(&ctx, "Acme", "alice", None).await?;

        let result = ctx
            .offers
            .create_offer(NewOffer {
                organization: "Acme".to_string(),
                name: "Nope".to_string(),
                price: 1,
                category: None,
                active: true,
            })
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::NotAShop)),
            "expected NotAShop, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_offer_for_unknown_organization_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .offers
            .create_offer(NewOffer {
                organization: "Ghost Shop".to_string(),
                name: "Nope".to_string(),
                price: 1,
                category: None,
                active: true,
            })
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::UnknownOrganization)),
            "expected UnknownOrganization, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_rolls_back_the_whole_batch() -> TestResult {
        let ctx = TestContext::new().await;
        let offer = create_offer(&ctx, "Corner Bakery", 300).await?;
        let expiry = Timestamp::now().checked_add(SignedDuration::from_hours(24))?;

        let result = ctx
            .offers
            .add_codes(
                offer.id,
                vec![
                    NewCode { code: 1, expiry },
                    NewCode { code: 2, expiry },
                    NewCode { code: 1, expiry },
                ],
            )
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::DuplicateCode)),
            "expected DuplicateCode, got {result:?}"
        );

        let available = ctx.catalog.available_codes(offer.id, Timestamp::now()).await?;

        assert_eq!(available, 0);

        Ok(())
    }

    #[tokio::test]
    async fn same_code_number_may_exist_on_two_offers() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_offer(&ctx, "Corner Bakery", 300).await?;
        let second = create_offer(&ctx, "Corner Bakery", 500).await?;
        let expiry = Timestamp::now().checked_add(SignedDuration::from_hours(24))?;

        ctx.offers
            .add_codes(first.id, vec![NewCode { code: 42, expiry }])
            .await?;
        ctx.offers
            .add_codes(second.id, vec![NewCode { code: 42, expiry }])
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn add_codes_to_unknown_offer_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let expiry = Timestamp::now().checked_add(SignedDuration::from_hours(24))?;

        let result = ctx
            .offers
            .add_codes(OfferId::from_i64(404), vec![NewCode { code: 1, expiry }])
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::UnknownOffer)),
            "expected UnknownOffer, got {result:?}"
        );

        Ok(())
    }
}

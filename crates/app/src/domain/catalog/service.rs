//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::instrument;

use crate::{
    database::Stores,
    domain::{
        catalog::{
            errors::CatalogServiceError,
            models::{OfferView, assemble},
            repository::{CatalogEntry, PgCatalogRepository},
        },
        discounts::models::Discount,
        offers::{records::OfferId, repository::PgOffersRepository},
        organizations::repository::PgOrganizationsRepository,
    },
    images::{ImageStore, offer_image_key},
};

#[derive(Clone)]
pub struct PgCatalogService {
    stores: Stores,
    images: Arc<dyn ImageStore>,
    catalog: PgCatalogRepository,
    offers: PgOffersRepository,
    organizations: PgOrganizationsRepository,
}

impl std::fmt::Debug for PgCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCatalogService")
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

impl PgCatalogService {
    #[must_use]
    pub fn new(stores: Stores, images: Arc<dyn ImageStore>) -> Self {
        Self {
            stores,
            images,
            catalog: PgCatalogRepository::new(),
            offers: PgOffersRepository::new(),
            organizations: PgOrganizationsRepository::new(),
        }
    }

    fn view(entry: CatalogEntry, has_image: bool) -> Result<OfferView, CatalogServiceError> {
        let discount = entry.discount.map(Discount::try_from).transpose()?;

        Ok(assemble(entry.offer, discount, has_image)?)
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[instrument(skip(self))]
    async fn list_offers(
        &self,
        organization: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<OfferView>, CatalogServiceError> {
        let mut ledger = self.stores.ledger.begin().await?;

        let shop = self
            .organizations
            .find_organization(&mut ledger, organization)
            .await?
            .ok_or(CatalogServiceError::UnknownOrganization)?;

        ledger.commit().await?;

        if !shop.kind.is_shop() {
            return Err(CatalogServiceError::NotAShop);
        }

        let mut inventory = self.stores.inventory.begin().await?;

        let entries = self
            .catalog
            .list_entries(&mut inventory, organization, point_in_time)
            .await?;

        inventory.commit().await?;

        let images = self
            .images
            .existing(
                entries
                    .iter()
                    .map(|entry| offer_image_key(entry.offer.id))
                    .collect(),
            )
            .await;

        entries
            .into_iter()
            .map(|entry| {
                let has_image = images.contains(&offer_image_key(entry.offer.id));

                Self::view(entry, has_image)
            })
            .collect()
    }

    async fn get_offer(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<OfferView, CatalogServiceError> {
        let mut inventory = self.stores.inventory.begin().await?;

        let entry = self
            .catalog
            .find_entry(&mut inventory, offer, point_in_time)
            .await?
            .ok_or(CatalogServiceError::UnknownOffer)?;

        inventory.commit().await?;

        let has_image = self.images.exists(&offer_image_key(entry.offer.id)).await;

        Self::view(entry, has_image)
    }

    async fn available_codes(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<u64, CatalogServiceError> {
        let mut inventory = self.stores.inventory.begin().await?;

        self.offers
            .find_offer(&mut inventory, offer)
            .await?
            .ok_or(CatalogServiceError::UnknownOffer)?;

        let count = self
            .offers
            .count_available_codes(&mut inventory, offer, point_in_time)
            .await?;

        inventory.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists a shop's offers as seen at `point_in_time`.
    async fn list_offers(
        &self,
        organization: &str,
        point_in_time: Timestamp,
    ) -> Result<Vec<OfferView>, CatalogServiceError>;

    /// Retrieves a single offer view, e.g. to preview a purchase.
    async fn get_offer(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<OfferView, CatalogServiceError>;

    /// Counts codes that could still be bought at `point_in_time`.
    async fn available_codes(
        &self,
        offer: OfferId,
        point_in_time: Timestamp,
    ) -> Result<u64, CatalogServiceError>;
}

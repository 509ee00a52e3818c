//! Organizations service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Stores,
    domain::organizations::{
        data::NewOrganization, errors::OrganizationsServiceError, records::Organization,
        repository::PgOrganizationsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrganizationsService {
    stores: Stores,
    repository: PgOrganizationsRepository,
}

impl PgOrganizationsService {
    #[must_use]
    pub fn new(stores: Stores) -> Self {
        Self {
            stores,
            repository: PgOrganizationsRepository::new(),
        }
    }
}

#[async_trait]
impl OrganizationsService for PgOrganizationsService {
    async fn create_organization(
        &self,
        organization: NewOrganization,
    ) -> Result<Organization, OrganizationsServiceError> {
        if organization.name.trim().is_empty() {
            return Err(OrganizationsServiceError::InvalidData);
        }

        // Offers reference the inventory copy of a shop. Inventory first, then ledger.
        let inventory = if organization.kind.is_shop() {
            Some(self.stores.inventory.begin().await?)
        } else {
            None
        };

        let mut ledger = self.stores.ledger.begin().await?;

        let created = self
            .repository
            .create_organization(&mut ledger, &organization)
            .await?;

        if let Some(mut inventory) = inventory {
            self.repository
                .mirror_shop(&mut inventory, &created.name)
                .await?;

            inventory.commit().await?;
        }

        ledger.commit().await?;

        info!(organization = %created.name, kind = %created.kind, "organization registered");

        Ok(created)
    }

    async fn get_organization(&self, name: &str) -> Result<Organization, OrganizationsServiceError> {
        let mut ledger = self.stores.ledger.begin().await?;

        let organization = self
            .repository
            .find_organization(&mut ledger, name)
            .await?
            .ok_or(OrganizationsServiceError::UnknownOrganization)?;

        ledger.commit().await?;

        Ok(organization)
    }
}

#[automock]
#[async_trait]
pub trait OrganizationsService: Send + Sync {
    /// Registers an organization. Shops are also made known to the inventory store.
    async fn create_organization(
        &self,
        organization: NewOrganization,
    ) -> Result<Organization, OrganizationsServiceError>;

    /// Retrieves an organization by name.
    async fn get_organization(&self, name: &str) -> Result<Organization, OrganizationsServiceError>;
}

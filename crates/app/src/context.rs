//! App Context

use std::{path::PathBuf, sync::Arc, time::Duration};

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Stores},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        discounts::{DiscountsService, PgDiscountsService},
        offers::{OffersService, PgOffersService},
        organizations::{OrganizationsService, PgOrganizationsService},
        purchases::{PgPurchasesService, PurchaseReconciler, PurchasesService},
        transactions::{PgTransactionsService, TransactionsService},
        users::{PgUsersService, UsersService},
    },
    images::{FsImageStore, ImageStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("reconciler staleness {stale_after} must exceed the purchase timeout {timeout:?}")]
    StaleAfterTooShort {
        stale_after: SignedDuration,
        timeout: Duration,
    },
}

/// Settings needed to wire the services together.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub inventory_url: String,
    pub ledger_url: String,

    /// Root holding the `Offers/` image folder.
    pub images_dir: PathBuf,

    pub purchase_timeout: Duration,

    /// Age after which an unsettled purchase is handed to the reconciler.
    pub reconcile_stale_after: Duration,
}

#[derive(Clone)]
pub struct AppContext {
    pub organizations: Arc<dyn OrganizationsService>,
    pub users: Arc<dyn UsersService>,
    pub offers: Arc<dyn OffersService>,
    pub discounts: Arc<dyn DiscountsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub purchases: Arc<dyn PurchasesService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to both stores and build the services along with the reconciler that
    /// settles purchases they leave unfinished.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the reconciler
    /// threshold does not exceed the purchase timeout.
    pub async fn connect(
        settings: &AppSettings,
    ) -> Result<(Self, PurchaseReconciler), AppInitError> {
        if settings.reconcile_stale_after <= settings.purchase_timeout {
            return Err(AppInitError::StaleAfterTooShort {
                stale_after: signed(settings.reconcile_stale_after),
                timeout: settings.purchase_timeout,
            });
        }

        let stores = database::connect_stores(&settings.inventory_url, &settings.ledger_url)
            .await
            .map_err(AppInitError::Database)?;

        let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(&settings.images_dir));

        let reconciler =
            PurchaseReconciler::new(stores.clone(), signed(settings.reconcile_stale_after));

        Ok((
            Self::from_stores(stores, images, settings.purchase_timeout),
            reconciler,
        ))
    }

    #[must_use]
    pub fn from_stores(
        stores: Stores,
        images: Arc<dyn ImageStore>,
        purchase_timeout: Duration,
    ) -> Self {
        Self {
            organizations: Arc::new(PgOrganizationsService::new(stores.clone())),
            users: Arc::new(PgUsersService::new(stores.ledger.clone())),
            offers: Arc::new(PgOffersService::new(stores.clone())),
            discounts: Arc::new(PgDiscountsService::new(stores.inventory.clone())),
            catalog: Arc::new(PgCatalogService::new(stores.clone(), images.clone())),
            purchases: Arc::new(PgPurchasesService::new(stores.clone(), purchase_timeout)),
            transactions: Arc::new(PgTransactionsService::new(stores.ledger.clone(), images)),
            auth: Arc::new(PgAuthService::new(stores.ledger)),
        }
    }
}

fn signed(duration: Duration) -> SignedDuration {
    SignedDuration::try_from(duration).unwrap_or(SignedDuration::MAX)
}

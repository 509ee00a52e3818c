//! Transactions service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::instrument;

use crate::{
    database::Db,
    domain::{
        organizations::repository::PgOrganizationsRepository,
        transactions::{
            errors::TransactionsServiceError,
            models::TransactionView,
            records::TransactionRecord,
            repository::PgTransactionsRepository,
        },
        users::repository::PgUsersRepository,
    },
    images::{ImageStore, offer_image_key},
};

#[derive(Clone)]
pub struct PgTransactionsService {
    ledger: Db,
    images: Arc<dyn ImageStore>,
    transactions: PgTransactionsRepository,
    organizations: PgOrganizationsRepository,
    users: PgUsersRepository,
}

impl std::fmt::Debug for PgTransactionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTransactionsService")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(ledger: Db, images: Arc<dyn ImageStore>) -> Self {
        Self {
            ledger,
            images,
            transactions: PgTransactionsRepository::new(),
            organizations: PgOrganizationsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }

    async fn views(
        &self,
        records: Vec<TransactionRecord>,
    ) -> Result<Vec<TransactionView>, TransactionsServiceError> {
        let images = self
            .images
            .existing(
                records
                    .iter()
                    .map(|record| offer_image_key(record.offer.id))
                    .collect(),
            )
            .await;

        records
            .into_iter()
            .map(|record| {
                let has_image = images.contains(&offer_image_key(record.offer.id));

                TransactionView::from_record(record, has_image)
            })
            .collect()
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        login: &str,
    ) -> Result<Vec<TransactionView>, TransactionsServiceError> {
        let mut tx = self.ledger.begin().await?;

        self.users
            .find_user(&mut tx, login)
            .await?
            .ok_or(TransactionsServiceError::UnknownUser)?;

        let records = self.transactions.list_for_user(&mut tx, login).await?;

        tx.commit().await?;

        self.views(records).await
    }

    #[instrument(skip(self))]
    async fn list_all(
        &self,
        shop: Option<String>,
    ) -> Result<Vec<TransactionView>, TransactionsServiceError> {
        let shop = shop.as_deref();
        let mut tx = self.ledger.begin().await?;

        if let Some(shop) = shop {
            let organization = self
                .organizations
                .find_organization(&mut tx, shop)
                .await?
                .ok_or(TransactionsServiceError::UnknownOrganization)?;

            if !organization.kind.is_shop() {
                return Err(TransactionsServiceError::NotAShop);
            }
        }

        let records = self.transactions.list(&mut tx, shop).await?;

        tx.commit().await?;

        self.views(records).await
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Purchase history of one user, newest first.
    async fn list_for_user(
        &self,
        login: &str,
    ) -> Result<Vec<TransactionView>, TransactionsServiceError>;

    /// Every purchase, or only those made at `shop`, newest first.
    async fn list_all(
        &self,
        shop: Option<String>,
    ) -> Result<Vec<TransactionView>, TransactionsServiceError>;
}

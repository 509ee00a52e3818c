//! Users service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::users::{
        data::NewUser, errors::UsersServiceError, records::User, repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    ledger: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(ledger: Db) -> Self {
        Self {
            ledger,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        if user.login.trim().is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let credits = user.credits.map(i64::try_from).transpose()?;

        let mut tx = self.ledger.begin().await?;

        let created = self.repository.create_user(&mut tx, &user, credits).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, login: &str) -> Result<User, UsersServiceError> {
        let mut tx = self.ledger.begin().await?;

        let user = self
            .repository
            .find_user(&mut tx, login)
            .await?
            .ok_or(UsersServiceError::UnknownUser)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn balance(&self, login: &str) -> Result<u64, UsersServiceError> {
        self.get_user(login).await.map(|user| user.balance())
    }

    #[instrument(skip(self))]
    async fn adjust_credits(&self, login: &str, delta: i64) -> Result<User, UsersServiceError> {
        let mut tx = self.ledger.begin().await?;

        let user = self
            .repository
            .adjust_credits(&mut tx, login, delta, Timestamp::now())
            .await?
            .ok_or(UsersServiceError::UnknownUser)?;

        tx.commit().await?;

        info!(balance = user.balance(), "credits adjusted");

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a user in an existing organization.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieves a user by login.
    async fn get_user(&self, login: &str) -> Result<User, UsersServiceError>;

    /// Spendable credits of a user.
    async fn balance(&self, login: &str) -> Result<u64, UsersServiceError>;

    /// Adds a signed amount to a user's balance. A result below zero is stored as zero.
    async fn adjust_credits(&self, login: &str, delta: i64) -> Result<User, UsersServiceError>;
}

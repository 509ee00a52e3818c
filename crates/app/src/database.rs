//! Database connection management

use sqlx::{Error, PgPool, Postgres, Transaction, error::ErrorKind, migrate::MigrateError};

/// Handle to one relational store.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction on this store.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, Error> {
        self.pool.begin().await
    }
}

/// The two stores a purchase spans.
///
/// Inventory owns offers, discounts and the code pools. Ledger owns organizations, users,
/// balances, sessions, purchase intents and the receipt copies.
#[derive(Debug, Clone)]
pub struct Stores {
    pub inventory: Db,
    pub ledger: Db,
}

impl Stores {
    #[must_use]
    pub fn new(inventory: PgPool, ledger: PgPool) -> Self {
        Self {
            inventory: Db::new(inventory),
            ledger: Db::new(ledger),
        }
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, Error> {
    PgPool::connect(database_url).await
}

/// Connect to both stores.
///
/// # Errors
///
/// Returns an error if either connection cannot be established.
pub async fn connect_stores(inventory_url: &str, ledger_url: &str) -> Result<Stores, Error> {
    let (inventory, ledger) = tokio::try_join!(connect(inventory_url), connect(ledger_url))?;

    Ok(Stores::new(inventory, ledger))
}

/// Apply pending migrations to both stores.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(stores: &Stores) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations/inventory")
        .run(stores.inventory.pool())
        .await?;

    sqlx::migrate!("../../migrations/ledger")
        .run(stores.ledger.pool())
        .await?;

    Ok(())
}

/// Broad classification of a store error, shared by every service error mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreFault {
    NotFound,
    Duplicate,
    MissingReference,
    MissingValue,
    Constraint,
    Contention,
    Unavailable,
    Other,
}

/// Serialization failure, deadlock and lock-not-available SQLSTATEs.
const CONTENTION_CODES: [&str; 3] = ["40001", "40P01", "55P03"];

pub(crate) fn classify(error: &Error) -> StoreFault {
    match error {
        Error::RowNotFound => StoreFault::NotFound,
        Error::Io(_)
        | Error::Tls(_)
        | Error::Protocol(_)
        | Error::PoolTimedOut
        | Error::PoolClosed
        | Error::WorkerCrashed => StoreFault::Unavailable,
        _ => {
            let Some(database_error) = error.as_database_error() else {
                return StoreFault::Other;
            };

            if database_error
                .code()
                .is_some_and(|code| CONTENTION_CODES.contains(&code.as_ref()))
            {
                return StoreFault::Contention;
            }

            match database_error.kind() {
                ErrorKind::UniqueViolation => StoreFault::Duplicate,
                ErrorKind::ForeignKeyViolation => StoreFault::MissingReference,
                ErrorKind::NotNullViolation => StoreFault::MissingValue,
                ErrorKind::CheckViolation => StoreFault::Constraint,
                ErrorKind::Other | _ => StoreFault::Other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_classified_as_not_found() {
        assert_eq!(classify(&Error::RowNotFound), StoreFault::NotFound);
    }

    #[test]
    fn pool_failures_are_unavailable() {
        assert_eq!(classify(&Error::PoolTimedOut), StoreFault::Unavailable);
        assert_eq!(classify(&Error::PoolClosed), StoreFault::Unavailable);
    }

    #[test]
    fn decode_failures_are_other() {
        let error = Error::ColumnNotFound("price".to_string());

        assert_eq!(classify(&error), StoreFault::Other);
    }
}

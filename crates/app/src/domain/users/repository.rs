//! Users Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::users::{
    data::NewUser,
    records::{Role, User},
};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const ADJUST_CREDITS_SQL: &str = include_str!("sql/adjust_credits.sql");
const DEBIT_CREDITS_SQL: &str = include_str!("sql/debit_credits.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(login)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
        credits: Option<i64>,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(&user.login)
            .bind(&user.organization)
            .bind(user.role.as_str())
            .bind(credits)
            .fetch_one(&mut **tx)
            .await
    }

    /// Applies a signed delta, clamping the balance at zero.
    pub(crate) async fn adjust_credits(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        delta: i64,
        now: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(ADJUST_CREDITS_SQL)
            .bind(login)
            .bind(delta)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Subtracts `amount` only if the balance covers it. Returns `None` when it does not, or
    /// when the user is unknown.
    pub(crate) async fn debit_credits(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        amount: i64,
        now: Timestamp,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(DEBIT_CREDITS_SQL)
            .bind(login)
            .bind(amount)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        let credits = row
            .try_get::<Option<i64>, _>("credits")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "credits".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            login: row.try_get("login")?,
            organization: row.try_get("organization")?,
            role,
            credits,
            latest_update: row
                .try_get::<Option<SqlxTimestamp>, _>("latest_update")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

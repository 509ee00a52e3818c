//! Auth repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, Identity, NewSession, SessionMetadata, SessionUuid},
    },
    domain::users::records::Role,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");
const LIST_SESSIONS_SQL: &str = include_str!("sql/list_sessions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &NewSession<'_>,
    ) -> Result<SessionMetadata, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(CREATE_SESSION_SQL)
            .bind(session.uuid.into_uuid())
            .bind(session.login)
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(session.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    /// Unrevoked, unexpired session with its user's identity.
    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        version: SessionTokenVersion,
        now: Timestamp,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(version.as_i16())
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        now: Timestamp,
    ) -> Result<Option<SessionMetadata>, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(REVOKE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_sessions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
    ) -> Result<Vec<SessionMetadata>, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(LIST_SESSIONS_SQL)
            .bind(login)
            .fetch_all(&mut **tx)
            .await
    }
}

fn decode_version(row: &PgRow) -> sqlx::Result<SessionTokenVersion> {
    let version: i16 = row.try_get("version")?;

    SessionTokenVersion::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: "version".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for SessionMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            login: row.try_get("login")?,
            version: decode_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            identity: Identity {
                login: row.try_get("login")?,
                role,
                organization: row.try_get("organization")?,
            },
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

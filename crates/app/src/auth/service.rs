//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, instrument};

use crate::{
    auth::{
        AuthServiceError, Identity, IssuedSession, SessionMetadata, SessionTokenVersion,
        SessionUuid, build_verifier_input, format_session_token, generate_session_secret,
        hash_verifier, models::NewSession, parse_session_token, repository::PgAuthRepository,
        verify,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    ledger: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(ledger: Db) -> Self {
        Self {
            ledger,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new session for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] when no such user exists, or a storage error.
    #[instrument(skip(self))]
    pub async fn issue_session(
        &self,
        login: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid.into_uuid(), version, &secret);

        let verifier_input =
            build_verifier_input(&session_uuid.into_uuid(), version, login, &secret);

        let mut tx = self.ledger.begin().await?;

        let metadata = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    login,
                    version,
                    token_hash: hash_verifier(&verifier_input),
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(session = %metadata.uuid, "session issued");

        Ok(IssuedSession { token, metadata })
    }

    /// List every session of the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sessions(
        &self,
        login: &str,
    ) -> Result<Vec<SessionMetadata>, AuthServiceError> {
        let mut tx = self.ledger.begin().await?;

        let sessions = self.repository.list_sessions(&mut tx, login).await?;

        tx.commit().await?;

        Ok(sessions)
    }

    /// Revoke a session. Returns `true` if the session was still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, session: SessionUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.ledger.begin().await?;

        let revoked = self
            .repository
            .revoke_session(&mut tx, session, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }

    async fn touch(&self, session: SessionUuid, now: Timestamp) -> Result<(), sqlx::Error> {
        let mut tx = self.ledger.begin().await?;

        self.repository.touch_session(&mut tx, session, now).await?;

        tx.commit().await
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;
        let session = SessionUuid::from_uuid(parsed.session_uuid);
        let now = Timestamp::now();

        let mut tx = self.ledger.begin().await?;

        let active = self
            .repository
            .find_active_session(&mut tx, session, parsed.version, now)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        let verifier_input = build_verifier_input(
            &parsed.session_uuid,
            parsed.version,
            &active.identity.login,
            &parsed.secret,
        );

        if active.version != parsed.version || !verify(&verifier_input, &active.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort; authentication does not depend on this write.
        if let Err(error) = self.touch(session, now).await {
            debug!(%session, %error, "could not record session use");
        }

        Ok(active.identity)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves a bearer token to the identity of its session's user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;
}

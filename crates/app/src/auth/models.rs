//! Auth data models.

use jiff::Timestamp;

use crate::{auth::SessionTokenVersion, domain::users::records::Role, uuids::TypedUuid};

/// Session Uuid
pub type SessionUuid = TypedUuid<SessionMetadata>;

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    pub role: Role,
    pub organization: String,
}

impl Identity {
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Administrators manage every organization, managers only their own.
    #[must_use]
    pub fn manages(&self, organization: &str) -> bool {
        match self.role {
            Role::Administrator => true,
            Role::Manager => self.organization == organization,
            Role::Worker => false,
        }
    }
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub identity: Identity,

    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// SHA-256 verifier of the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata {
    pub uuid: SessionUuid,
    pub login: String,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession<'a> {
    pub uuid: SessionUuid,
    pub login: &'a str,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub metadata: SessionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            login: "bob".to_string(),
            role,
            organization: "Corner Bakery".to_string(),
        }
    }

    #[test]
    fn managers_manage_only_their_organization() {
        let manager = identity(Role::Manager);

        assert!(manager.manages("Corner Bakery"));
        assert!(!manager.manages("Cinema"));
    }

    #[test]
    fn administrators_manage_everything() {
        assert!(identity(Role::Administrator).manages("Cinema"));
        assert!(identity(Role::Administrator).is_administrator());
    }

    #[test]
    fn workers_manage_nothing() {
        assert!(!identity(Role::Worker).manages("Corner Bakery"));
    }
}

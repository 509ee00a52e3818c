//! Session token formatting, parsing, and verifier hashing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "ls";

/// Number of secret bytes encoded in a token.
pub const SESSION_SECRET_BYTES: usize = 32;

const SESSION_SECRET_HEX_CHARS: usize = SESSION_SECRET_BYTES * 2;

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl From<SessionTokenVersion> for i16 {
    fn from(value: SessionTokenVersion) -> Self {
        value.as_i16()
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionSecret::from_bytes(secret)
}

/// Render a token as `ls_{version}_{uuid}.{secret_hex}`.
#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a bearer token into its parts without consulting storage.
///
/// # Errors
///
/// Returns [`SessionTokenError`] when the prefix, version, uuid or secret is malformed.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid,
        version,
        secret: SessionSecret::from_bytes(secret),
    })
}

/// Build the canonical verifier input bytes for a token.
///
/// Format: `{session_uuid_hex}:{version_i16_decimal}:{login}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    session_uuid: &Uuid,
    version: SessionTokenVersion,
    login: &str,
    secret: &SessionSecret,
) -> Vec<u8> {
    let input = format!(
        "{}:{}:{}:{}",
        session_uuid.simple(),
        version.as_i16(),
        login,
        encode_hex(secret.as_bytes()),
    );

    input.into_bytes()
}

/// Lowercase hex SHA-256 of the verifier input, as stored.
#[must_use]
pub fn hash_verifier(input: &[u8]) -> String {
    encode_hex(&Sha256::digest(input))
}

/// Compare a verifier input against a stored hash without short-circuiting.
#[must_use]
pub fn verify(input: &[u8], stored_hash: &str) -> bool {
    let computed = hash_verifier(input);

    computed.len() == stored_hash.len()
        && computed
            .bytes()
            .zip(stored_hash.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; SESSION_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let hi = decode_hex_nibble(pair[0])?;
        let lo = decode_hex_nibble(pair[1])?;

        *byte = (hi << 4) | lo;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_and_format_round_trip() -> TestResult {
        let session_uuid = Uuid::nil();
        let secret = SessionSecret::from_bytes([0xAB; SESSION_SECRET_BYTES]);
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);
        let parsed = parse_session_token(&token)?;

        assert!(token.starts_with("ls_v1_"));
        assert_eq!(parsed.session_uuid, session_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let result = parse_session_token("nope_v1_00000000000000000000000000000000.aa");

        assert!(
            matches!(result, Err(SessionTokenError::InvalidFormat)),
            "expected InvalidFormat, got {result:?}"
        );
    }

    #[test]
    fn parse_rejects_short_secret() {
        let result = parse_session_token("ls_v1_00000000000000000000000000000000.abcd");

        assert!(
            matches!(result, Err(SessionTokenError::InvalidSecretEncoding)),
            "expected InvalidSecretEncoding, got {result:?}"
        );
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let secret = "ab".repeat(SESSION_SECRET_BYTES);
        let result = parse_session_token(&format!(
            "ls_v9_00000000000000000000000000000000.{secret}"
        ));

        assert!(
            matches!(result, Err(SessionTokenError::UnsupportedVersion)),
            "expected UnsupportedVersion, got {result:?}"
        );
    }

    #[test]
    fn verifier_hash_depends_on_login() {
        let secret = SessionSecret::from_bytes([0xCD; SESSION_SECRET_BYTES]);
        let alice = build_verifier_input(&Uuid::nil(), SessionTokenVersion::V1, "alice", &secret);
        let bob = build_verifier_input(&Uuid::nil(), SessionTokenVersion::V1, "bob", &secret);

        let stored = hash_verifier(&alice);

        assert_eq!(stored.len(), 64);
        assert!(verify(&alice, &stored));
        assert!(!verify(&bob, &stored));
    }
}

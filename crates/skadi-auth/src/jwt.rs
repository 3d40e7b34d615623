//! Signed bearer tokens (JWT, HS256).
//!
//! A token is three base64url segments: header, payload and HMAC-SHA256
//! signature. The payload always carries `exp` (unix seconds) next to the
//! caller's claims:
//!
//! ```text
//! { "exp": 1700000300, "kind": "access", "id": 7, "role": "student" }
//! ```
//!
//! The free functions ([`issue`], [`verify`]) are generic over the claims and
//! know nothing about users. [`TokenCodec`] binds a secret, a lifetime and a
//! [`TokenKind`] together so access and refresh tokens can never be used in
//! each other's place.
//!
//! # Verification order
//!
//! 1. The token must have three segments and a readable header, else
//!    [`TokenError::Malformed`].
//! 2. The header must declare `HS256`. Anything else (including `none`) is
//!    [`TokenError::SignatureInvalid`].
//! 3. The signature must match the secret: [`TokenError::SignatureInvalid`].
//! 4. The payload must hold `exp` and the expected claims:
//!    [`TokenError::Malformed`].
//! 5. `now >= exp` is [`TokenError::Expired`]. No leeway is applied.

use std::time::Duration;

use chrono::{DateTime, Utc};
use data_encoding::BASE64URL_NOPAD;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use skadi_config::JwtConfig;

use crate::claims::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed")]
    Malformed,

    #[error("invalid signature")]
    SignatureInvalid,

    #[error("expired")]
    Expired,

    #[error("wrong token kind, expected {expected}")]
    KindMismatch { expected: TokenKind },

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Payload layout shared by every token: `exp` plus the flattened claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims<C> {
    pub exp: i64,
    #[serde(flatten)]
    pub claims: C,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Issues a token that expires `ttl` from now.
///
/// # Errors
///
/// Returns [`TokenError::Signing`] if the claims cannot be serialized or the
/// lifetime overflows the `exp` claim.
pub fn issue<C: Serialize>(secret: &[u8], ttl: Duration, claims: &C) -> Result<String, TokenError> {
    issue_at(secret, ttl, claims, Utc::now())
}

pub fn issue_at<C: Serialize>(
    secret: &[u8],
    ttl: Duration,
    claims: &C,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let ttl_secs = i64::try_from(ttl.as_secs())
        .map_err(|_| TokenError::Signing("token lifetime out of range".into()))?;
    let exp = now
        .timestamp()
        .checked_add(ttl_secs)
        .ok_or_else(|| TokenError::Signing("token lifetime out of range".into()))?;

    encode(
        &Header::new(Algorithm::HS256),
        &TokenClaims { exp, claims },
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verifies a token against `secret` and returns its claims.
///
/// See the module docs for the order in which failures are reported.
pub fn verify<C: DeserializeOwned>(secret: &[u8], token: &str) -> Result<C, TokenError> {
    verify_at(secret, token, Utc::now())
}

pub fn verify_at<C: DeserializeOwned>(
    secret: &[u8],
    token: &str,
    now: DateTime<Utc>,
) -> Result<C, TokenError> {
    check_header(token)?;

    let mut validation = Validation::new(Algorithm::HS256);
    // expiry is checked below with a closed boundary
    validation.validate_exp = false;
    validation.leeway = 0;

    let data = decode::<TokenClaims<C>>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

    if now.timestamp() >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(data.claims.claims)
}

fn check_header(token: &str) -> Result<(), TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let raw = BASE64URL_NOPAD
        .decode(header.as_bytes())
        .map_err(|_| TokenError::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

    if header.alg != "HS256" {
        return Err(TokenError::SignatureInvalid);
    }

    Ok(())
}

#[derive(Serialize, Deserialize)]
struct KindClaims<C> {
    kind: Option<TokenKind>,
    #[serde(flatten)]
    claims: C,
}

/// Token issuer/verifier for one [`TokenKind`].
///
/// The API holds two codecs, one per kind, each with its own secret and
/// lifetime. Tokens carry a `kind` claim; a codec rejects tokens of the
/// other kind even if the secrets were ever configured equal.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
    ttl: Duration,
    kind: TokenKind,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("kind", &self.kind)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration, kind: TokenKind) -> Self {
        Self {
            secret: secret.into(),
            ttl,
            kind,
        }
    }

    pub fn access(config: &JwtConfig) -> Self {
        Self::new(
            config.access_secret.as_bytes(),
            config.access_ttl,
            TokenKind::Access,
        )
    }

    pub fn refresh(config: &JwtConfig) -> Self {
        Self::new(
            config.refresh_secret.as_bytes(),
            config.refresh_ttl,
            TokenKind::Refresh,
        )
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now())
    }

    pub fn issue_at<C: Serialize>(
        &self,
        claims: &C,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = KindClaims {
            kind: Some(self.kind),
            claims,
        };
        issue_at(&self.secret, self.ttl, &claims, now)
    }

    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at<C: DeserializeOwned>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<C, TokenError> {
        let claims: KindClaims<C> = verify_at(&self.secret, token, now)?;

        if claims.kind != Some(self.kind) {
            return Err(TokenError::KindMismatch {
                expected: self.kind,
            });
        }

        Ok(claims.claims)
    }
}

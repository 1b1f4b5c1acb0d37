//! `v4.public` admin token minting and verification.
//!
//! Flow Overview:
//! 1) Build admin claims (id, role) with RFC3339 timestamps.
//! 2) Sign with `pasetors` using an Ed25519 key; the footer carries the key id.
//! 3) On verify, check the key id and signature before trusting any claim,
//!    then issuer, audience and the `iat`/`exp` window.

use anyhow::Context;
use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use ed25519_dalek::SigningKey;
use pasetors::Public;
use pasetors::errors::Error as PasetorsError;
use pasetors::footer::Footer;
use pasetors::keys::{AsymmetricPublicKey, AsymmetricSecretKey};
use pasetors::token::UntrustedToken;
use pasetors::version4::{PublicToken, V4};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

const ISSUER: &str = "portero:admin";
const AUDIENCE: &str = "portero:admin";
const CLOCK_SKEW_SECONDS: i64 = 60;
const DEFAULT_MAX_TTL_SECONDS: i64 = 24 * 60 * 60;
pub const SEED_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid key")]
    InvalidKey,
    #[error("invalid footer")]
    InvalidFooter,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unknown key id: {0}")]
    UnknownKid(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid issuer")]
    InvalidIssuer,
    #[error("invalid audience")]
    InvalidAudience,
    #[error("invalid issued-at")]
    InvalidIat,
    #[error("invalid expiration")]
    InvalidExp,
    #[error("token expired")]
    Expired,
    #[error("invalid token ttl")]
    InvalidTtl,
    #[error("invalid length")]
    InvalidLength,
    #[error("time format error")]
    TimeFormat,
    #[error("admin token seed must be {SEED_LENGTH} base64-encoded bytes")]
    InvalidSeed,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Full access, including session revocation.
    Admin,
    /// Read-only dashboard access.
    Viewer,
}

impl AdminRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Whether this role satisfies `required`.
    #[must_use]
    pub const fn allows(self, required: Self) -> bool {
        match required {
            Self::Viewer => true,
            Self::Admin => matches!(self, Self::Admin),
        }
    }
}

/// Decoded and validated admin token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminClaims {
    pub admin_id: Uuid,
    pub role: AdminRole,
    pub iss: String,
    pub aud: String,
    pub iat: String,
    pub exp: String,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenFooter {
    kid: String,
}

#[derive(Debug, Clone)]
pub struct AdminToken {
    pub token: String,
    pub expires_at: String,
}

pub struct AdminTokenSigner {
    signing_key: SigningKey,
    key_id: String,
    max_ttl_seconds: i64,
}

impl std::fmt::Debug for AdminTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenSigner")
            .field("signing_key", &"***")
            .field("key_id", &self.key_id)
            .field("max_ttl_seconds", &self.max_ttl_seconds)
            .finish()
    }
}

impl AdminTokenSigner {
    /// Build a signer with a randomly generated Ed25519 key.
    ///
    /// Tokens minted by this signer do not survive a restart.
    ///
    /// # Errors
    /// Returns an error if the OS random source fails.
    pub fn generate() -> anyhow::Result<Self> {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng
            .try_fill_bytes(&mut seed)
            .context("failed to generate admin token key")?;
        Ok(Self::from_seed(&seed))
    }

    #[must_use]
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let key_id = key_id(&signing_key);
        Self {
            signing_key,
            key_id,
            max_ttl_seconds: DEFAULT_MAX_TTL_SECONDS,
        }
    }

    /// Build a signer from a standard base64 encoded 32-byte seed.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidSeed`] if the seed does not decode to 32 bytes.
    pub fn from_base64_seed(encoded: &str) -> Result<Self, TokenError> {
        let bytes = Base64::decode_vec(encoded.trim()).map_err(|_| TokenError::InvalidSeed)?;
        let seed: [u8; SEED_LENGTH] = bytes.try_into().map_err(|_| TokenError::InvalidSeed)?;
        Ok(Self::from_seed(&seed))
    }

    #[must_use]
    pub fn with_max_ttl_seconds(mut self, seconds: i64) -> Self {
        self.max_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    #[must_use]
    pub fn max_ttl_seconds(&self) -> i64 {
        self.max_ttl_seconds
    }

    /// Issue an admin token valid for `ttl_seconds` from now.
    ///
    /// # Errors
    /// Returns an error if the ttl is out of range or encoding fails.
    pub fn issue(
        &self,
        admin_id: Uuid,
        role: AdminRole,
        ttl_seconds: i64,
    ) -> Result<AdminToken, TokenError> {
        self.issue_at(admin_id, role, ttl_seconds, OffsetDateTime::now_utc())
    }

    /// Issue an admin token as if the current time were `now`.
    ///
    /// # Errors
    /// Returns an error if the ttl is out of range or encoding fails.
    pub fn issue_at(
        &self,
        admin_id: Uuid,
        role: AdminRole,
        ttl_seconds: i64,
        now: OffsetDateTime,
    ) -> Result<AdminToken, TokenError> {
        if ttl_seconds <= 0 || ttl_seconds > self.max_ttl_seconds {
            return Err(TokenError::InvalidTtl);
        }
        let now = now.replace_nanosecond(0).map_err(|_| TokenError::TimeFormat)?;
        let exp = now + Duration::seconds(ttl_seconds);

        let iat = now.format(&Rfc3339).map_err(|_| TokenError::TimeFormat)?;
        let exp = exp.format(&Rfc3339).map_err(|_| TokenError::TimeFormat)?;

        let claims = AdminClaims {
            admin_id,
            role,
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat,
            exp: exp.clone(),
            jti: Uuid::new_v4().to_string(),
        };
        let footer = TokenFooter {
            kid: self.key_id.clone(),
        };

        let payload = serde_json::to_vec(&claims)?;
        let footer_bytes = serde_json::to_vec(&footer)?;
        let secret_key = AsymmetricSecretKey::<V4>::from(&self.signing_key.to_keypair_bytes())
            .map_err(|err| map_paseto_error(&err))?;
        let token = PublicToken::sign(&secret_key, &payload, Some(&footer_bytes), None)
            .map_err(|err| map_paseto_error(&err))?;

        Ok(AdminToken {
            token,
            expires_at: exp,
        })
    }

    /// Verify an admin token and return its claims.
    ///
    /// # Errors
    /// Returns an error if the token is malformed, signed by another key,
    /// tampered with, or outside its validity window.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Verify an admin token against an explicit unix time.
    ///
    /// # Errors
    /// See [`AdminTokenSigner::verify`].
    pub fn verify_at(&self, token: &str, now_unix_seconds: i64) -> Result<AdminClaims, TokenError> {
        let untrusted = UntrustedToken::<Public, V4>::try_from(token.trim())
            .map_err(|err| map_paseto_error(&err))?;
        let kid = footer_kid(untrusted.untrusted_footer())?;
        if kid != self.key_id {
            return Err(TokenError::UnknownKid(kid));
        }

        let public_key =
            AsymmetricPublicKey::<V4>::from(self.signing_key.verifying_key().as_bytes())
                .map_err(|err| map_paseto_error(&err))?;
        let trusted = PublicToken::verify(&public_key, &untrusted, None, None)
            .map_err(|err| map_paseto_error(&err))?;

        let claims: AdminClaims = serde_json::from_str(trusted.payload())?;
        validate_claims(&claims, now_unix_seconds, self.max_ttl_seconds)?;
        Ok(claims)
    }
}

fn validate_claims(
    claims: &AdminClaims,
    now_unix_seconds: i64,
    max_ttl_seconds: i64,
) -> Result<(), TokenError> {
    if claims.iss != ISSUER {
        return Err(TokenError::InvalidIssuer);
    }
    if claims.aud != AUDIENCE {
        return Err(TokenError::InvalidAudience);
    }

    let iat = unix_from_rfc3339(&claims.iat).map_err(|_| TokenError::InvalidIat)?;
    let exp = unix_from_rfc3339(&claims.exp).map_err(|_| TokenError::InvalidExp)?;

    if iat > now_unix_seconds + CLOCK_SKEW_SECONDS {
        return Err(TokenError::InvalidIat);
    }
    if exp <= now_unix_seconds {
        return Err(TokenError::Expired);
    }
    if exp <= iat || exp - iat > max_ttl_seconds {
        return Err(TokenError::InvalidTtl);
    }

    Ok(())
}

fn unix_from_rfc3339(value: &str) -> Result<i64, TokenError> {
    let dt = OffsetDateTime::parse(value, &Rfc3339).map_err(|_| TokenError::TimeFormat)?;
    Ok(dt.unix_timestamp())
}

fn key_id(signing_key: &SigningKey) -> String {
    let digest = Sha256::digest(signing_key.verifying_key().as_bytes());
    format!("portero.{}", Base64UrlUnpadded::encode_string(&digest[..16]))
}

fn footer_kid(footer_bytes: &[u8]) -> Result<String, TokenError> {
    if footer_bytes.is_empty() {
        return Err(TokenError::InvalidFooter);
    }
    let mut footer = Footer::new();
    footer
        .parse_bytes(footer_bytes)
        .map_err(|_| TokenError::InvalidFooter)?;
    footer
        .get_claim("kid")
        .and_then(|value| value.as_str())
        .map(ToString::to_string)
        .ok_or(TokenError::InvalidFooter)
}

fn map_paseto_error(err: &PasetorsError) -> TokenError {
    match err {
        PasetorsError::Base64 => TokenError::Base64,
        PasetorsError::TokenValidation => TokenError::InvalidSignature,
        PasetorsError::FooterParsing => TokenError::InvalidFooter,
        PasetorsError::LossyConversion => TokenError::InvalidLength,
        PasetorsError::Key => TokenError::InvalidKey,
        _ => TokenError::TokenFormat,
    }
}

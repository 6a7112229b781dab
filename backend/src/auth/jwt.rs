//! JWT token issuance and validation
//!
//! Tokens carry the account id as `sub` plus `iat`/`exp`, and are signed
//! with an HMAC key derived once from the configured secret.

use account_service_shared::TokenError;
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }
}

/// Token issuer and verifier
///
/// Keys and validation rules are built once at startup and shared via Arc,
/// so cloning into each request is cheap.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    algorithm: Algorithm,
    validation: Arc<Validation>,
    expiry_secs: i64,
}

impl TokenService {
    /// Create a token service signing with HS256 and no expiry leeway
    pub fn new(secret: &[u8], expiry_secs: i64) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256, expiry_secs, 0)
    }

    /// Create a token service from configured values
    ///
    /// Only the HMAC family is accepted since the key is a shared secret.
    pub fn from_config(
        secret: &[u8],
        algorithm: &str,
        expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self> {
        let algorithm: Algorithm = algorithm
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown JWT algorithm: {}", algorithm))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {}
            other => anyhow::bail!("JWT algorithm {:?} needs an asymmetric key", other),
        }

        Ok(Self::with_algorithm(secret, algorithm, expiry_secs, leeway_secs))
    }

    fn with_algorithm(
        secret: &[u8],
        algorithm: Algorithm,
        expiry_secs: i64,
        leeway_secs: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            algorithm,
            validation: Arc::new(validation),
            expiry_secs,
        }
    }

    /// Issue a token for an account
    pub fn issue(&self, account_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiry_secs);

        let claims = Claims {
            sub: account_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token and return the account id it was issued for
    ///
    /// The signature is checked before the expiry, so a tampered token is
    /// reported as `InvalidSignature` even when it has also expired.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| classify(e.kind()))?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

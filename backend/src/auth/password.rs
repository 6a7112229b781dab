//! Password hashing using argon2
//!
//! New hashes are Argon2id PHC strings with a random salt embedded, so
//! hashing the same password twice yields two different strings.
//! Verification reads the algorithm, parameters and salt back out of the
//! stored hash.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the
//! `*_async` variants, which run on the blocking thread pool.

use crate::config::HashingConfig;
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Prefixes of bcrypt hashes imported from the previous account store
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Password hashing service
///
/// Holds a configured Argon2id instance; cloning is cheap.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Build a hasher from configured cost parameters
    pub fn new(config: &HashingConfig) -> Result<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A malformed or unsupported hash is a mismatch, never an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            return bcrypt::verify(password, hash).unwrap_or(false);
        }

        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                debug!("Stored password hash is unparseable: {}", e);
                false
            }
        }
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: SecretString) -> Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password on the blocking thread pool
    ///
    /// Only fails if the blocking task itself dies.
    pub async fn verify_async(&self, password: SecretString, hash: String) -> Result<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

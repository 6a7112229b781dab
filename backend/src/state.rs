//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup from `AppConfig` and is
//! read-only afterwards; there are no process-wide globals.

use crate::auth::{CredentialHasher, TokenService};
use crate::config::AppConfig;
use crate::repositories::AccountRepository;
use anyhow::Result;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Shared application state
///
/// All fields are Arc-backed, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Account store
    pub accounts: Arc<dyn AccountRepository>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuer/verifier with pre-computed keys
    pub tokens: TokenService,
    /// Argon2id hasher with configured cost
    pub hasher: CredentialHasher,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails if the JWT algorithm or argon2 parameters are invalid.
    pub fn new(accounts: Arc<dyn AccountRepository>, config: AppConfig) -> Result<Self> {
        let tokens = TokenService::from_config(
            config.jwt.secret.expose_secret().as_bytes(),
            &config.jwt.algorithm,
            config.jwt.token_expiry_secs,
            config.jwt.leeway_secs,
        )?;
        let hasher = CredentialHasher::new(&config.hashing)?;

        Ok(Self {
            accounts,
            config: Arc::new(config),
            tokens,
            hasher,
        })
    }

    /// Get a reference to the account store
    #[inline]
    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Get a reference to the credential hasher
    #[inline]
    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }
}

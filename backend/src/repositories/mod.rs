//! Account repositories
//!
//! The [`AccountRepository`] trait is the seam between the services and the
//! backing store. Email uniqueness is the store's responsibility: a second
//! insert for the same email must fail with [`RepositoryError::Conflict`].

pub mod account;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub use account::PgAccountRepository;
pub use memory::InMemoryAccountRepository;

/// Stored account
#[derive(Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Input for creating an account
#[derive(Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl NewAccount {
    /// Assign a fresh identifier to a new account
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Lookup key for [`AccountRepository::find_one`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    Id(Uuid),
    Email(String),
}

/// Repository failures
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("account already exists")]
    Conflict,

    #[error("account not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Account store
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account, failing with `Conflict` on a duplicate email
    async fn insert(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    /// Fetch exactly one account, failing with `NotFound` when none matches
    async fn find_one(&self, filter: AccountFilter) -> Result<Account, RepositoryError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;
}

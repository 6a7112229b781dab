//! In-memory account repository
//!
//! Used for local development (`database.store = "memory"`) and tests.
//! Both indexes live under one lock so the email check and the insert are
//! atomic.

use super::{Account, AccountFilter, AccountRepository, NewAccount, RepositoryError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Store {
    by_id: HashMap<Uuid, Account>,
    by_email: HashMap<String, Uuid>,
}

/// Process-local account store
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    inner: Arc<RwLock<Store>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut store = self.inner.write().await;

        if store.by_email.contains_key(&account.email) || store.by_id.contains_key(&account.id) {
            return Err(RepositoryError::Conflict);
        }

        let record = Account {
            id: account.id,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        store.by_email.insert(record.email.clone(), record.id);
        store.by_id.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_one(&self, filter: AccountFilter) -> Result<Account, RepositoryError> {
        let store = self.inner.read().await;

        let id = match filter {
            AccountFilter::Id(id) => id,
            AccountFilter::Email(email) => *store
                .by_email
                .get(&email)
                .ok_or(RepositoryError::NotFound)?,
        };

        store
            .by_id
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

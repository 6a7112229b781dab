//! PostgreSQL account repository

use super::{Account, AccountFilter, AccountRepository, NewAccount, RepositoryError};
use async_trait::async_trait;
use sqlx::PgPool;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Account repository backed by the `accounts` table
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique index violation into `Conflict`
fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            RepositoryError::Conflict
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn find_one(&self, filter: AccountFilter) -> Result<Account, RepositoryError> {
        let query = match &filter {
            AccountFilter::Id(id) => sqlx::query_as::<_, Account>(
                r#"
                SELECT id, email, password_hash, created_at
                FROM accounts
                WHERE id = $1
                "#,
            )
            .bind(*id),
            AccountFilter::Email(email) => sqlx::query_as::<_, Account>(
                r#"
                SELECT id, email, password_hash, created_at
                FROM accounts
                WHERE email = $1
                "#,
            )
            .bind(email.as_str()),
        };

        query
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(RepositoryError::Other)
    }
}

//! Account service: registration, login and profile lookup
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - Email uniqueness is left to the repository, so concurrent registers
//!   for one email produce exactly one account

use crate::auth::{CredentialHasher, TokenService};
use crate::error::{ApiError, LOGIN_FAILED_MESSAGE};
use crate::repositories::{AccountFilter, AccountRepository, NewAccount, RepositoryError};
use account_service_shared::{AuthResponse, Credentials, UserProfile};
use tracing::{info, instrument};
use uuid::Uuid;

/// Account service operations
pub struct AccountService;

impl AccountService {
    /// Register a new account and issue its first token
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn register(
        accounts: &dyn AccountRepository,
        hasher: &CredentialHasher,
        tokens: &TokenService,
        credentials: Credentials,
    ) -> Result<AuthResponse, ApiError> {
        let password_hash = hasher
            .hash_async(credentials.password)
            .await
            .map_err(ApiError::Internal)?;

        let account = accounts
            .insert(NewAccount::new(credentials.email, password_hash))
            .await?;

        let token = tokens.issue(account.id).map_err(ApiError::Internal)?;
        info!(account_id = %account.id, "Account registered");

        Ok(AuthResponse {
            id: account.id,
            email: account.email,
            token,
        })
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password carry the same message.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(
        accounts: &dyn AccountRepository,
        hasher: &CredentialHasher,
        tokens: &TokenService,
        credentials: Credentials,
    ) -> Result<AuthResponse, ApiError> {
        let account = match accounts
            .find_one(AccountFilter::Email(credentials.email))
            .await
        {
            Ok(account) => account,
            Err(RepositoryError::NotFound) => {
                return Err(ApiError::NotFound(LOGIN_FAILED_MESSAGE.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let valid = hasher
            .verify_async(credentials.password, account.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            info!(account_id = %account.id, "Login rejected");
            return Err(ApiError::InvalidCredential);
        }

        let token = tokens.issue(account.id).map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            id: account.id,
            email: account.email,
            token,
        })
    }

    /// Fetch the profile of an authenticated account
    pub async fn get_profile(
        accounts: &dyn AccountRepository,
        account_id: Uuid,
    ) -> Result<UserProfile, ApiError> {
        let account = accounts.find_one(AccountFilter::Id(account_id)).await?;

        Ok(UserProfile {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
        })
    }
}

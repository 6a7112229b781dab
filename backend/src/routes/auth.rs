//! Authentication routes
//!
//! Provides endpoints for account registration and login. Both answer
//! `{id, email, token}`; the token goes back verbatim in
//! `Authorization: Bearer <token>`.

use super::extract::CredentialsJson;
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use account_service_shared::AuthResponse;
use axum::{extract::State, routing::post, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account
///
/// POST /register
async fn register(
    State(state): State<AppState>,
    CredentialsJson(credentials): CredentialsJson,
) -> ApiResult<Json<AuthResponse>> {
    let response =
        AccountService::register(state.accounts(), state.hasher(), state.tokens(), credentials)
            .await?;
    Ok(Json(response))
}

/// Login with email and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    CredentialsJson(credentials): CredentialsJson,
) -> ApiResult<Json<AuthResponse>> {
    let response =
        AccountService::login(state.accounts(), state.hasher(), state.tokens(), credentials)
            .await?;
    Ok(Json(response))
}

//! Authenticated account routes

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use account_service_shared::UserProfile;
use axum::{extract::State, middleware, routing::get, Json, Router};

/// Create routes that require a bearer token
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Get the caller's profile
///
/// GET /user
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = AccountService::get_profile(state.accounts(), auth.account_id).await?;
    Ok(Json(profile))
}

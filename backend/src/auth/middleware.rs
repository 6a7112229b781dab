//! Authentication middleware
//!
//! [`require_auth`] verifies the bearer token once, at the edge of the
//! protected routes, and stores the resulting [`AuthUser`] in the request
//! extensions. Handlers take `AuthUser` as an extractor and never see the
//! raw token.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

/// Verified identity of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub account_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

/// Middleware that rejects requests without a valid bearer token
///
/// Apply with `axum::middleware::from_fn_with_state`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let account_id = state.tokens().verify(token).map_err(|e| {
        debug!(reason = %e, "Rejected bearer token");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { account_id });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers(Some("Bearer abc.def.ghi"))).unwrap(), "abc.def.ghi");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    #[case(Some("bearer abc"))]
    #[case(Some("abc.def.ghi"))]
    fn test_bad_authorization_rejected(#[case] value: Option<&str>) {
        assert!(matches!(
            bearer_token(&headers(value)),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_extractor_requires_middleware() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_extractor_reads_extension() {
        let account_id = Uuid::new_v4();
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(AuthUser { account_id });

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.account_id, account_id);
    }
}

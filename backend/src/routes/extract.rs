//! Request body extraction
//!
//! Decodes a JSON credentials body and validates it into [`Credentials`],
//! mapping every decoding failure onto the API error taxonomy instead of
//! axum's default plain-text rejections.

use crate::error::ApiError;
use account_service_shared::{Credentials, CredentialsRequest, MalformedInput};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};

/// Validated credentials taken from a JSON request body
#[derive(Debug)]
pub struct CredentialsJson(pub Credentials);

#[axum::async_trait]
impl<S> FromRequest<S> for CredentialsJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let Json(body) = Json::<CredentialsRequest>::from_request(req, state)
            .await
            .map_err(|rejection| json_rejection(rejection, &content_type))?;

        Ok(Self(Credentials::try_from(body)?))
    }
}

fn json_rejection(rejection: JsonRejection, content_type: &str) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType(format!(
            "Need content-type: 'application/json', but got '{}'",
            content_type
        )),
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        other => ApiError::MalformedInput(MalformedInput::new(other.body_text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use secrecy::ExposeSecret;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/login");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = request(
            Some("application/json"),
            r#"{"email":"a@x.com","password":"secret"}"#,
        );
        let CredentialsJson(creds) = CredentialsJson::from_request(req, &()).await.unwrap();

        assert_eq!(creds.email, "a@x.com");
        assert_eq!(creds.password.expose_secret(), "secret");
    }

    #[tokio::test]
    async fn test_charset_suffix_accepted() {
        let req = request(
            Some("application/json; charset=utf-8"),
            r#"{"email":"a@x.com","password":"secret"}"#,
        );
        assert!(CredentialsJson::from_request(req, &()).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_content_type() {
        let req = request(Some("text/plain"), r#"{"email":"a@x.com","password":"x"}"#);
        let err = CredentialsJson::from_request(req, &()).await.unwrap_err();

        assert!(matches!(err, ApiError::UnsupportedMediaType(msg) if msg.contains("text/plain")));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = request(None, r#"{"email":"a@x.com","password":"x"}"#);
        let err = CredentialsJson::from_request(req, &()).await.unwrap_err();

        assert!(matches!(err, ApiError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let req = request(Some("application/json"), "{not json");
        let err = CredentialsJson::from_request(req, &()).await.unwrap_err();

        assert!(matches!(err, ApiError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_wrong_field_type() {
        let req = request(Some("application/json"), r#"{"email":42,"password":"x"}"#);
        let err = CredentialsJson::from_request(req, &()).await.unwrap_err();

        assert!(matches!(err, ApiError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_missing_field() {
        let req = request(Some("application/json"), r#"{"email":"a@x.com"}"#);
        let err = CredentialsJson::from_request(req, &()).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::MalformedInput(MalformedInput { field: Some(f), .. }) if f == "password"
        ));
    }
}

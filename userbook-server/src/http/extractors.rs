//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

/// Raw `(name, email)` fields as submitted; either may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct UserFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Extract a body as JSON or as a urlencoded form, chosen by `Content-Type`.
///
/// Anything not declared as JSON is decoded as a form.
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/users");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn decodes_json() {
        let req = request(
            Some("application/json; charset=utf-8"),
            r#"{"name":"Alice","email":"alice@example.com"}"#,
        );
        let FormOrJson(fields) = FormOrJson::<UserFields>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(fields.name.as_deref(), Some("Alice"));
        assert_eq!(fields.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn decodes_form() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "name=Bob&email=bob%40test.com",
        );
        let FormOrJson(fields) = FormOrJson::<UserFields>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(fields.name.as_deref(), Some("Bob"));
        assert_eq!(fields.email.as_deref(), Some("bob@test.com"));
    }

    #[tokio::test]
    async fn absent_fields_are_none() {
        let req = request(Some("application/json"), r#"{"name":"Alice"}"#);
        let FormOrJson(fields) = FormOrJson::<UserFields>::from_request(req, &())
            .await
            .unwrap();
        assert!(fields.email.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let req = request(Some("application/json"), "{not json");
        let err = FormOrJson::<UserFields>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}

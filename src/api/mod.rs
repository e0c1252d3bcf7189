//! FlyForms API Client
//!
//! Typed wrappers around the REST endpoints, organized by domain.

mod auth;
mod forms;
mod health;
mod responses;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config;

// Re-export all public items
pub use auth::*;
pub use forms::*;
pub use health::*;
pub use responses::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Your session has expired, please log in again")]
    Unauthorized,

    #[error("{detail}")]
    Status { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The token was rejected; nothing else should be requested with it
    pub fn ends_session(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Request payload encodings
pub(crate) enum Body {
    Json(serde_json::Value),
    Form(Vec<(&'static str, String)>),
}

/// Build the error for a non-2xx response from its status and body text
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            // validation errors: [{"msg": ...}, ...]
            serde_json::Value::Array(errors) => {
                let msgs: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    ApiError::Status { status, detail }
}

pub(crate) async fn send(
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Body>,
) -> Result<Response, ApiError> {
    let url = format!("{}{}", config::api_url(), path);
    let mut request = Client::new().request(method.clone(), &url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request = match body {
        Some(Body::Json(json)) => request.json(&json),
        Some(Body::Form(fields)) => request.form(&fields),
        None => request,
    };

    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    log::warn!("{} {} -> {}", method, path, status);
    Err(status_error(status.as_u16(), &text))
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Body, ApiError> {
    serde_json::to_value(value)
        .map(Body::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_detail_string() {
        let err = status_error(404, r#"{"detail": "Form not found"}"#);
        assert_eq!(err, ApiError::Status { status: 404, detail: "Form not found".into() });
        assert_eq!(err.to_string(), "Form not found");
    }

    #[test]
    fn test_status_error_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}, {"msg": "bad email"}]}"#;
        match status_error(422, body) {
            ApiError::Status { detail, .. } => assert_eq!(detail, "field required; bad email"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_status_error_fallbacks() {
        assert_eq!(status_error(401, "{}"), ApiError::Unauthorized);
        assert!(status_error(401, "{}").ends_session());
        assert!(!status_error(403, r#"{"detail": "Not allowed"}"#).ends_session());
        assert_eq!(
            status_error(500, "<html>oops</html>").to_string(),
            "Request failed with status 500"
        );
    }
}

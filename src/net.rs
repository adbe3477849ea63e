//! REST types and the API seam for `/api/user` and `/api/login`.
//!
//! The browser implementation lives in `web`; response interpretation is
//! done here by [`parse_user`] and [`parse_login`] so it is shared and
//! testable without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Current user as reported by `GET /api/user`.
///
/// The server answers `{"username": null}` for missing or invalid tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

/// Outcome of a login request the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    Issued { token: String, message: Option<String> },
    /// The server refused the credentials; carries its `error` text.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Body(String),
}

#[async_trait(?Send)]
pub trait UserApi {
    /// `GET endpoint` with `Authorization: Bearer <token>`.
    async fn current_user(&self, endpoint: &str, token: &str) -> Result<User, ApiError>;

    /// `POST endpoint` with the credentials as a JSON body.
    async fn login(&self, endpoint: &str, credentials: &Credentials) -> Result<LoginReply, ApiError>;
}

#[derive(Deserialize)]
struct IssuedBody {
    token: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct RejectedBody {
    error: String,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a `/api/user` response.
///
/// # Errors
///
/// [`ApiError::Status`] for non-2xx responses, [`ApiError::Body`] when the
/// body is not the expected JSON.
pub fn parse_user(status: u16, body: &str) -> Result<User, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Status(status));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Body(e.to_string()))
}

/// Interpret a `/api/login` response. `400` carries a rejection message.
///
/// # Errors
///
/// [`ApiError::Status`] for statuses other than 2xx and 400,
/// [`ApiError::Body`] when the body does not match the status.
pub fn parse_login(status: u16, body: &str) -> Result<LoginReply, ApiError> {
    if is_success(status) {
        let issued: IssuedBody = serde_json::from_str(body).map_err(|e| ApiError::Body(e.to_string()))?;
        return Ok(LoginReply::Issued { token: issued.token, message: issued.message });
    }
    if status == 400 {
        let rejected: RejectedBody = serde_json::from_str(body).map_err(|e| ApiError::Body(e.to_string()))?;
        return Ok(LoginReply::Rejected(rejected.error));
    }
    Err(ApiError::Status(status))
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
#[path = "net_test.rs"]
mod tests;

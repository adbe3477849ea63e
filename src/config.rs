//! Session display configuration.
//!
//! Every fixed name the page scripts agree on (storage key, endpoints,
//! element ids) lives here with a default. Pages may override any subset by
//! embedding a JSON document; missing fields keep their defaults.

use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "token";
pub const DEFAULT_USER_ENDPOINT: &str = "/api/user";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/api/login";
pub const DEFAULT_STATUS_CONTAINER_ID: &str = "userStatus";
pub const DEFAULT_ADMIN_LINK_IDS: [&str; 2] = ["users_management", "products_management"];
pub const DEFAULT_ADMIN_LEVEL_THRESHOLD: i64 = 1;
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid session config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Text shown by the status widget. `{username}` in `greeting` is replaced
/// with the escaped username.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub greeting: String,
    pub logout: String,
    pub login: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            greeting: "Hello, {username}!".to_owned(),
            logout: "Log out".to_owned(),
            login: "Log in / Register".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Local storage key holding the bearer token.
    pub storage_key: String,
    pub user_endpoint: String,
    pub login_endpoint: String,
    /// Element whose markup the status widget replaces.
    pub status_container_id: String,
    /// Navbar entries revealed for privileged levels.
    pub admin_link_ids: Vec<String>,
    /// Links are revealed when the decoded level is strictly greater.
    pub admin_level_threshold: i64,
    /// Navigation target after logout.
    pub home_path: String,
    pub login_path: String,
    pub labels: StatusLabels,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            user_endpoint: DEFAULT_USER_ENDPOINT.to_owned(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_owned(),
            status_container_id: DEFAULT_STATUS_CONTAINER_ID.to_owned(),
            admin_link_ids: DEFAULT_ADMIN_LINK_IDS.iter().map(|id| (*id).to_owned()).collect(),
            admin_level_threshold: DEFAULT_ADMIN_LEVEL_THRESHOLD,
            home_path: DEFAULT_HOME_PATH.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            labels: StatusLabels::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a JSON override document. Absent fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON or
    /// a field has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

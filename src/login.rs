//! Credential login: exchange account and password for a token and store it.

use crate::net::{Credentials, LoginReply, UserApi};
use crate::session::Session;
use crate::token::{Claims, decode_claims};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("account and password are required")]
    EmptyCredentials,
    #[error("login rejected: {0}")]
    Rejected(String),
    #[error("login request failed: {0}")]
    Transport(#[from] crate::net::ApiError),
}

/// A stored login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedIn {
    /// Server message accompanying the token, if any.
    pub message: Option<String>,
    /// Claims decoded from the new token, when it decodes. Display only.
    pub claims: Option<Claims>,
}

/// Submit credentials to the login endpoint and store the issued token.
///
/// # Errors
///
/// [`LoginError::EmptyCredentials`] without sending anything when either
/// field is blank, [`LoginError::Rejected`] when the server refuses, and
/// [`LoginError::Transport`] for request or response failures. The stored
/// token is left untouched on every error.
pub async fn login(session: &Session, api: &dyn UserApi, account: &str, password: &str) -> Result<LoggedIn, LoginError> {
    if account.trim().is_empty() || password.is_empty() {
        return Err(LoginError::EmptyCredentials);
    }

    let credentials = Credentials { account: account.to_owned(), password: password.to_owned() };
    match api.login(&session.config().login_endpoint, &credentials).await? {
        LoginReply::Issued { token, message } => {
            session.store_token(&token);
            let claims = decode_claims(&token)
                .inspect_err(|e| log::warn!("issued token is not decodable: {e}"))
                .ok();
            log::debug!("login succeeded for {account}");
            Ok(LoggedIn { message, claims })
        }
        LoginReply::Rejected(reason) => Err(LoginError::Rejected(reason)),
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;

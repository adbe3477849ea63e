//! Auth status widget and logout.
//!
//! Fetches the current user for the stored token and renders either a
//! greeting with a logout link or a login/register link into the status
//! container.
//!
//! ERROR HANDLING
//! ==============
//! A missing token skips the request. Request, status and body failures are
//! logged and rendered as signed out, so the widget never stays empty.

use std::rc::Rc;

use crate::config::SessionConfig;
use crate::net::{User, UserApi};
use crate::page::{Navigator, Page};
use crate::session::Session;

/// Id of the logout anchor rendered into `container_id`. Unique per
/// container so several widgets on one page each get their own handler.
#[must_use]
pub fn logout_link_id(container_id: &str) -> String {
    format!("{container_id}-logout")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    SignedIn { username: String },
    SignedOut,
}

impl StatusView {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        match user.username.as_deref() {
            Some(name) if !name.is_empty() => Self::SignedIn { username: name.to_owned() },
            _ => Self::SignedOut,
        }
    }

    /// Markup for the status container `container_id`.
    #[must_use]
    pub fn markup(&self, config: &SessionConfig, container_id: &str) -> String {
        let labels = &config.labels;
        match self {
            Self::SignedIn { username } => {
                let greeting = labels.greeting.replace("{username}", &escape_html(username));
                let link_id = escape_html(&logout_link_id(container_id));
                format!(r##"<a href="#">{greeting}</a> <a href="#" id="{link_id}">{}</a>"##, labels.logout)
            }
            Self::SignedOut => {
                format!(r#"<a href="{}">{}</a>"#, escape_html(&config.login_path), labels.login)
            }
        }
    }
}

/// Populate `container_id` (or the configured status container) with the
/// current sign-in state and wire the logout link.
///
/// Returns the view that was selected, whether or not the container exists.
pub async fn load_user_status(
    session: &Session,
    api: &dyn UserApi,
    page: &dyn Page,
    navigator: Rc<dyn Navigator>,
    container_id: Option<&str>,
) -> StatusView {
    let config = session.config();
    let container_id = container_id.unwrap_or(config.status_container_id.as_str());

    let user = match session.token() {
        None => {
            log::debug!("no stored token; showing signed-out status");
            User::default()
        }
        Some(token) => match api.current_user(&config.user_endpoint, &token).await {
            Ok(user) => user,
            Err(e) => {
                log::error!("failed to load current user: {e}");
                User::default()
            }
        },
    };

    let view = StatusView::from_user(&user);
    if !page.set_inner_html(container_id, &view.markup(config, container_id)) {
        log::debug!("status container #{container_id} not found");
        return view;
    }

    if matches!(view, StatusView::SignedIn { .. }) {
        let session = session.clone();
        page.on_click(&logout_link_id(container_id), Box::new(move || logout(&session, &*navigator)));
    }
    view
}

/// Forget the stored token and go to the home page.
///
/// Nothing is sent to the server; the token stays valid until it expires.
pub fn logout(session: &Session, navigator: &dyn Navigator) {
    session.clear();
    navigator.navigate(&session.config().home_path);
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

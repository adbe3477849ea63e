//! Browser bindings: `localStorage`, DOM, navigation, HTTP and the WASM
//! entry points called from page markup.
//!
//! On start the module installs the console logger and panic hook, reads the
//! optional `<script type="application/json" id="session-config">` override,
//! then renders the status widget and the admin navbar once.

use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};

use crate::config::SessionConfig;
use crate::login::LoggedIn;
use crate::net::{self, ApiError, Credentials, LoginReply, User, UserApi};
use crate::page::{Navigator, Page};
use crate::session::{Session, TokenStore};
use crate::{navbar, status, token};

const CONFIG_ELEMENT_ID: &str = "session-config";

// =============================================================================
// STORAGE
// =============================================================================

/// `window.localStorage`. Every call is a no-op when storage is unavailable
/// (private browsing, sandboxed iframes).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage write failed for {key}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage remove failed for {key}");
            }
        }
    }
}

// =============================================================================
// DOM
// =============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserPage;

fn element(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

impl Page for BrowserPage {
    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        let Some(el) = element(id) else {
            return false;
        };
        el.set_inner_html(html);
        true
    }

    fn reveal(&self, id: &str) -> bool {
        let Some(el) = element(id) else {
            return false;
        };
        let _ = el.remove_attribute("hidden");
        true
    }

    fn on_click(&self, id: &str, handler: Box<dyn Fn()>) -> bool {
        let Some(el) = element(id) else {
            return false;
        };
        let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            ev.prevent_default();
            handler();
        }) as Box<dyn FnMut(web_sys::Event)>);
        let attached = el
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .is_ok();
        // Leaked: one small closure per rendered logout link.
        cb.forget();
        attached
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Same-origin REST client over `gloo-net`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpUserApi;

#[async_trait(?Send)]
impl UserApi for HttpUserApi {
    async fn current_user(&self, endpoint: &str, token: &str) -> Result<User, ApiError> {
        let resp = gloo_net::http::Request::get(endpoint)
            .header("Authorization", &net::bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Body(e.to_string()))?;
        net::parse_user(status, &body)
    }

    async fn login(&self, endpoint: &str, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let resp = gloo_net::http::Request::post(endpoint)
            .json(credentials)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Body(e.to_string()))?;
        net::parse_login(status, &body)
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Read the page's config override, falling back to defaults.
#[must_use]
pub fn page_config() -> SessionConfig {
    let raw = element(CONFIG_ELEMENT_ID).and_then(|el| el.text_content());
    let Some(raw) = raw else {
        return SessionConfig::default();
    };
    SessionConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}; using default session config");
        SessionConfig::default()
    })
}

fn browser_session() -> Session {
    Session::new(Rc::new(LocalStorage), page_config())
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    wasm_bindgen_futures::spawn_local(async {
        let session = browser_session();
        navbar::control_navbar_links(&session, &BrowserPage);
        status::load_user_status(&session, &HttpUserApi, &BrowserPage, Rc::new(BrowserNavigator), None).await;
    });
}

/// Re-render the status widget, optionally into a different container.
#[wasm_bindgen(js_name = loadUserStatus)]
pub async fn load_user_status(container_id: Option<String>) {
    let session = browser_session();
    status::load_user_status(&session, &HttpUserApi, &BrowserPage, Rc::new(BrowserNavigator), container_id.as_deref())
        .await;
}

#[wasm_bindgen(js_name = controlNavbarLinks)]
pub fn control_navbar_links() {
    navbar::control_navbar_links(&browser_session(), &BrowserPage);
}

#[wasm_bindgen]
pub fn logout() {
    status::logout(&browser_session(), &BrowserNavigator);
}

#[wasm_bindgen(js_name = isTokenExpired)]
pub fn is_token_expired(token: Option<String>) -> bool {
    token::is_token_expired(token.as_deref())
}

/// Log in and return the server's message. Rejects with the error text.
///
/// # Errors
///
/// Rejects the returned promise with the [`crate::login::LoginError`] text.
#[wasm_bindgen]
pub async fn login(account: String, password: String) -> Result<JsValue, JsValue> {
    let session = browser_session();
    match crate::login::login(&session, &HttpUserApi, &account, &password).await {
        Ok(LoggedIn { message, .. }) => Ok(message.map_or(JsValue::UNDEFINED, |m| JsValue::from_str(&m))),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

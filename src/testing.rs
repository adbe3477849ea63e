//! In-memory fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::config::SessionConfig;
use crate::net::{ApiError, Credentials, LoginReply, User, UserApi};
use crate::page::{Navigator, Page};
use crate::session::{MemoryStore, Session};

// =============================================================================
// LOG CAPTURE
// =============================================================================

thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Global sink that buffers records per test thread.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Run `f` and return its result with the log records it emitted on this
/// thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    RECORDS.with(|r| r.borrow_mut().clear());
    let out = f();
    let records = RECORDS.with(|r| r.borrow_mut().drain(..).collect());
    (out, records)
}

pub fn has_error(records: &[(log::Level, String)]) -> bool {
    records.iter().any(|(level, _)| *level == log::Level::Error)
}

// =============================================================================
// FAKES
// =============================================================================

/// Build a token with the given payload and a dummy signature.
pub fn mint_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

pub fn session_with_token(token: Option<&str>) -> (Session, Rc<MemoryStore>) {
    let store = Rc::new(MemoryStore::default());
    let config = SessionConfig::default();
    if let Some(token) = token {
        store.insert(&config.storage_key, token);
    }
    (Session::new(store.clone(), config), store)
}

#[derive(Default)]
struct FakeElement {
    inner_html: String,
    hidden: bool,
}

/// Page double holding a fixed set of elements by id.
#[derive(Default)]
pub struct RecordingPage {
    elements: RefCell<HashMap<String, FakeElement>>,
    handlers: RefCell<HashMap<String, Box<dyn Fn()>>>,
}

impl RecordingPage {
    /// Elements start hidden, like the navbar entries in the page markup.
    pub fn with_hidden(ids: &[&str]) -> Self {
        let page = Self::default();
        for id in ids {
            page.elements
                .borrow_mut()
                .insert((*id).to_owned(), FakeElement { inner_html: String::new(), hidden: true });
        }
        page
    }

    pub fn with_elements(ids: &[&str]) -> Self {
        let page = Self::with_hidden(ids);
        for element in page.elements.borrow_mut().values_mut() {
            element.hidden = false;
        }
        page
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.inner_html.clone())
    }

    pub fn is_hidden(&self, id: &str) -> Option<bool> {
        self.elements.borrow().get(id).map(|e| e.hidden)
    }

    pub fn has_handler(&self, id: &str) -> bool {
        self.handlers.borrow().contains_key(id)
    }

    /// Invoke the click handler registered on `id`, if any.
    pub fn click(&self, id: &str) -> bool {
        let handlers = self.handlers.borrow();
        match handlers.get(id) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl Page for RecordingPage {
    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        match self.elements.borrow_mut().get_mut(id) {
            Some(element) => {
                element.inner_html = html.to_owned();
                true
            }
            None => false,
        }
    }

    fn reveal(&self, id: &str) -> bool {
        match self.elements.borrow_mut().get_mut(id) {
            Some(element) => {
                element.hidden = false;
                true
            }
            None => false,
        }
    }

    fn on_click(&self, id: &str, handler: Box<dyn Fn()>) -> bool {
        // Anchors inside rendered markup are not modelled as elements.
        self.handlers.borrow_mut().insert(id.to_owned(), handler);
        true
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}

/// API double returning canned replies and recording requests.
pub struct ScriptedApi {
    user_reply: Result<User, ApiError>,
    login_reply: Result<LoginReply, ApiError>,
    user_calls: RefCell<Vec<(String, String)>>,
    login_calls: RefCell<Vec<(String, Credentials)>>,
}

impl ScriptedApi {
    pub fn with_user(reply: Result<User, ApiError>) -> Self {
        Self {
            user_reply: reply,
            login_reply: Err(ApiError::Transport("login not scripted".to_owned())),
            user_calls: RefCell::new(Vec::new()),
            login_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_login(reply: Result<LoginReply, ApiError>) -> Self {
        Self { login_reply: reply, ..Self::with_user(Err(ApiError::Transport("user not scripted".to_owned()))) }
    }

    /// `(endpoint, token)` for every user request.
    pub fn user_calls(&self) -> Vec<(String, String)> {
        self.user_calls.borrow().clone()
    }

    pub fn login_calls(&self) -> Vec<(String, Credentials)> {
        self.login_calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl UserApi for ScriptedApi {
    async fn current_user(&self, endpoint: &str, token: &str) -> Result<User, ApiError> {
        self.user_calls.borrow_mut().push((endpoint.to_owned(), token.to_owned()));
        self.user_reply.clone()
    }

    async fn login(&self, endpoint: &str, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.login_calls.borrow_mut().push((endpoint.to_owned(), credentials.clone()));
        self.login_reply.clone()
    }
}

//! # storefront-session
//!
//! Browser-side session display for the storefront: the auth status widget,
//! the admin navbar toggle, login and logout.
//!
//! Everything decoded from the stored token here is a display hint. The
//! server re-checks `level` and `exp` on every request; nothing in this crate
//! is an authorization decision.
//!
//! DESIGN
//! ======
//! Operations take an explicit [`session::Session`] plus the [`page::Page`],
//! [`page::Navigator`] and [`net::UserApi`] seams instead of touching browser
//! globals. The `hydrate` feature provides the `web-sys`/`gloo-net`
//! implementations and the WASM entry point; without it the crate is plain
//! Rust and is tested against in-memory fakes.

pub mod config;
pub mod login;
pub mod navbar;
pub mod net;
pub mod page;
pub mod session;
pub mod status;
pub mod token;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SessionConfig;
pub use navbar::{NavbarOutcome, control_navbar_links};
pub use session::{MemoryStore, Session, TokenStore};
pub use status::{StatusView, load_user_status, logout};
pub use token::{Claims, DecodeError, decode_claims, is_token_expired, is_token_expired_at};

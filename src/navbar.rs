//! Admin navbar visibility.
//!
//! Management links are rendered hidden and revealed only when the stored
//! token's `level` claim is above the configured threshold. This is a
//! display hint; the management pages enforce the level server-side.

use crate::page::Page;
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum NavbarOutcome {
    NoToken,
    /// Token could not be decoded; links stay hidden.
    DecodeFailed,
    BelowThreshold { level: f64 },
    /// Ids whose `hidden` attribute was removed. Missing elements are skipped.
    Revealed { ids: Vec<String> },
}

/// Reveal the admin links when the stored token grants a high enough level.
pub fn control_navbar_links(session: &Session, page: &dyn Page) -> NavbarOutcome {
    let Some(token) = session.token() else {
        return NavbarOutcome::NoToken;
    };

    let claims = match crate::token::decode_claims(&token) {
        Ok(claims) => claims,
        Err(e) => {
            log::error!("token parsing failed: {e}");
            return NavbarOutcome::DecodeFailed;
        }
    };

    let config = session.config();
    if !claims.level_exceeds(config.admin_level_threshold) {
        return NavbarOutcome::BelowThreshold { level: claims.level() };
    }

    let ids: Vec<String> = config
        .admin_link_ids
        .iter()
        .filter(|id| page.reveal(id))
        .cloned()
        .collect();
    log::debug!("revealed admin links: {ids:?}");
    NavbarOutcome::Revealed { ids }
}

#[cfg(test)]
#[path = "navbar_test.rs"]
mod tests;

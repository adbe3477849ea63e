//! Unverified decoding of the stored bearer token.
//!
//! The token follows the three-segment `header.payload.signature` shape with
//! a base64 JSON object in the middle. Only the payload is read and the
//! signature is never checked, so [`Claims`] are display hints: the server
//! remains the authority on expiry and permission level.
//!
//! ERROR HANDLING
//! ==============
//! Decoding returns [`DecodeError`]; callers choose a fail-closed default
//! (treat as expired, keep links hidden) rather than propagating.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("no token stored")]
    MissingToken,
    #[error("expected 3 token segments, found {0}")]
    Segments(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Payload fields read from the token.
///
/// Claims are coerced leniently: numbers and numeric strings are accepted
/// for numeric claims, strings for text claims, and anything else is treated
/// as absent rather than failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_number")]
    pub exp: Option<f64>,
    /// Permission tier. Absent means 0.
    #[serde(default, deserialize_with = "lenient_number")]
    pub level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub iat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub nbf: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub account: Option<String>,
}

impl Claims {
    /// Permission level with absence mapped to 0.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level.unwrap_or(0.0)
    }

    /// Whether the level is strictly above `threshold`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn level_exceeds(&self, threshold: i64) -> bool {
        self.level() > threshold as f64
    }

    /// Whether `exp` lies before `now` (epoch seconds).
    ///
    /// A token without `exp` counts as expired.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.exp {
            Some(exp) => exp < now as f64,
            None => {
                log::warn!("token has no exp claim; treating as expired");
                true
            }
        }
    }
}

/// Decode the payload segment of `token` without verifying the signature.
///
/// Both the URL-safe and the standard base64 alphabets are accepted, with or
/// without padding.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token does not have exactly three
/// segments or the payload is not base64-encoded JSON object text.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Segments(segments.len()));
    }

    let bytes = decode_segment(segments[1])?;
    let payload: Value = serde_json::from_slice(&bytes)?;
    if !payload.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    Ok(serde_json::from_value(payload)?)
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD.decode(normalized)
}

/// Current wall-clock time in epoch seconds.
#[must_use]
pub fn now_epoch_secs() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Whether `token` is absent, undecodable, or past its `exp`.
#[must_use]
pub fn is_token_expired(token: Option<&str>) -> bool {
    is_token_expired_at(token, now_epoch_secs())
}

/// [`is_token_expired`] against an explicit clock reading.
#[must_use]
pub fn is_token_expired_at(token: Option<&str>, now: i64) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return true;
    };
    match decode_claims(token) {
        Ok(claims) => claims.is_expired_at(now),
        Err(e) => {
            log::error!("token parsing failed: {e}");
            true
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_number))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;

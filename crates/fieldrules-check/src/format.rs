//! Structural format checks.
//!
//! These only inspect shape. `is_jwt` in particular does not verify any
//! signature and says nothing about whether a token is trustworthy.

use std::sync::OnceLock;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use regex::Regex;
use serde_json::Value;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

/// Three non-empty base64url segments separated by `.`, where the first two
/// (header and claims) decode to JSON objects.
pub fn is_jwt(value: &str) -> bool {
    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() != 3 {
        return false;
    }
    if !segments.iter().all(|segment| is_base64url(segment)) {
        return false;
    }
    segments[..2].iter().all(|segment| decodes_to_object(segment))
}

/// `local@domain.tld` with a dotted domain made of valid DNS labels.
pub fn is_email(value: &str) -> bool {
    if value.len() > 254 {
        return false;
    }
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Canonical hyphenated UUID: 8-4-4-4-12 hex digits, any case.
pub fn is_uuid(value: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let parts: Vec<&str> = value.split('-').collect();
    parts.len() == GROUPS.len()
        && parts
            .iter()
            .zip(GROUPS)
            .all(|(part, len)| part.len() == len && part.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_base64url(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn decodes_to_object(segment: &str) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment) else {
        return false;
    };
    matches!(serde_json::from_slice::<Value>(&bytes), Ok(Value::Object(_)))
}

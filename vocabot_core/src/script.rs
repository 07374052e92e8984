//! Script checks for user-entered words.
//!
//! Both patterns match the empty string. Callers reject empty input before
//! calling them.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static SOURCE_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{Cyrillic}&&\p{L}]*$").unwrap());

#[allow(clippy::unwrap_used)]
static TARGET_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{Latin}&&\p{L}]*$").unwrap());

/// Every character is a Cyrillic letter.
#[must_use]
pub fn is_source_script(text: &str) -> bool {
    SOURCE_SCRIPT.is_match(text)
}

/// Every character is a Latin letter.
#[must_use]
pub fn is_target_script(text: &str) -> bool {
    TARGET_SCRIPT.is_match(text)
}

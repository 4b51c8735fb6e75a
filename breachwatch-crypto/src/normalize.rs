//! Email normalization and shape checking.
//!
//! Normalization is total and idempotent. The shape check is purely
//! syntactic: no DNS or mailbox validation happens anywhere in BreachWatch.

use std::sync::LazyLock;

use regex::Regex;

use breachwatch_core::constants::{MAX_EMAIL_LEN, MIN_EMAIL_LEN};

/// local-part `@` domain `.` alphabetic TLD of at least two letters.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email shape pattern is a valid regex")
});

/// Canonicalizes a raw email string.
///
/// Control characters (including NUL) are stripped first, then surrounding
/// whitespace is trimmed, then the result is lowercased. Stripping before
/// trimming keeps the function idempotent for inputs such as `"a@b.co \0"`.
///
/// # Example
///
/// ```rust
/// use breachwatch_crypto::normalize;
///
/// assert_eq!(normalize("  Test@Example.COM\0"), "test@example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_control()).collect();
    stripped.trim().to_lowercase()
}

/// Returns true if `normalized` looks like an email address.
///
/// Length is measured in bytes and must fall in `[3, 254]`.
pub fn is_well_formed(normalized: &str) -> bool {
    let len = normalized.len();
    if !(MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&len) {
        return false;
    }
    EMAIL_SHAPE.is_match(normalized)
}

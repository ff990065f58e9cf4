//! Conventional-commit shape rules: category prefixes, scope filtering,
//! the version-like fallback and heading cleanup for rendered lines.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::domain::category::{Category, OTHERS, RELEASE};

/// Loose version token: `v1.2.3-rc1`, `2.0`, `1.2.3.4`.
///
/// Word characters, digits and boundaries are ASCII only.
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\bv?\d+(\.\d+)+[-\w]*\b")
        .unicode(false)
        .build()
        .expect("Invalid regex")
});

/// `type:`, `type(scope):` or `(scope):` anywhere in the line, ASCII words only.
static CONVENTIONAL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"(\w+\([a-zA-Z_-]+\)|\w+|\([a-zA-Z_-]+\)):")
        .unicode(false)
        .build()
        .expect("Invalid regex")
});

/// Whether `message` passes the optional scope filter.
///
/// With a scope, the message must contain `(<scope>):` literally.
pub fn in_scope(message: &str, scope: Option<&str>) -> bool {
    match scope {
        Some(scope) => message.contains(&format!("({}):", scope)),
        None => true,
    }
}

/// Whether `message` opens with `<key>:` or `<key>(`.
pub fn has_prefix(message: &str, key: &str) -> bool {
    message
        .strip_prefix(key)
        .is_some_and(|rest| rest.starts_with(':') || rest.starts_with('('))
}

/// Whether `message` carries a version-like token.
pub fn is_version_like(message: &str) -> bool {
    VERSION_TOKEN.is_match(message)
}

/// Category key for `message`: first matching prefix in declared order,
/// then `release` for version-like text, then `others`.
pub fn categorize(message: &str) -> &'static str {
    if let Some(category) = Category::prefixed().find(|category| has_prefix(message, category.key))
    {
        return category.key;
    }

    if is_version_like(message) {
        RELEASE
    } else {
        OTHERS
    }
}

/// Category key for `message`, or `None` when the scope filter drops it.
pub fn classify(message: &str, scope: Option<&str>) -> Option<&'static str> {
    if !in_scope(message, scope) {
        return None;
    }
    Some(categorize(message))
}

/// Removes the conventional `type(scope):` header from a single line.
///
/// Lines starting with `:` are only trimmed. Lines without a header shape are
/// returned unchanged. The header test is unanchored, so any `word:` in the
/// line counts, and the text after the first colon is kept.
pub fn strip_header(line: &str) -> String {
    if !CONVENTIONAL_HEADER.is_match(line) {
        return line.to_string();
    }
    if line.starts_with(':') {
        return line.trim().to_string();
    }
    match line.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => line.to_string(),
    }
}

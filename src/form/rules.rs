//! Validation rules: boxed closures from field value to optional error.
//!
//! A rule receives the field's current raw value and returns `Some(message)`
//! when the value fails, `None` when it passes. Rules are stored on the
//! field definition itself, so adding a field never means touching a
//! dispatch table elsewhere.

use std::sync::OnceLock;

use regex::Regex;

/// A field validation rule.
///
/// Returns the error message to display, or `None` when the value passes.
pub type Validator = Box<dyn Fn(&str) -> Option<String>>;

// ---------------------------------------------------------------------------
// Rule constructors
// ---------------------------------------------------------------------------

/// Fail with `message` when the value is empty after trimming whitespace.
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Some(message.clone())
        } else {
            None
        }
    })
}

/// Fail with `message` when the value is not shaped like an email address.
///
/// An empty value is not shaped like an email address either, so it fails
/// with the same format message rather than a separate required message.
pub fn email_format(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if is_email_shaped(value) {
            None
        } else {
            Some(message.clone())
        }
    })
}

/// Fail with `message` when the value is shorter than `min` characters.
///
/// Length is counted in characters, not bytes.
pub fn min_len(min: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min {
            Some(message.clone())
        } else {
            None
        }
    })
}

// ---------------------------------------------------------------------------
// Email shape check
// ---------------------------------------------------------------------------

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        // RFC-5322-style address shape: printable local part, `@`, dotted
        // domain of letter/digit/hyphen labels.
        Regex::new(
            r"(?x)
            ^[A-Za-z0-9.!\#$%&'*+/=?^_`{|}~-]+
            @
            [A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?
            (?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+
            $",
        )
        .expect("invalid email regex")
    })
}

/// Whether `value` passes the email shape check.
pub fn is_email_shaped(value: &str) -> bool {
    email_regex().is_match(value)
}

// ===========================================================================
// Tests
// ===========================================================================

//! Contact field validation mirroring backend constraints.
//!
//! This module provides validation rules that match the backend's contact
//! types in `backend/src/domain/contact.rs`. Keeping these rules in sync
//! ensures generated contacts are always valid when consumed by the backend.
//!
//! # Validation Rules
//!
//! - Contact names: non-empty after trimming, at most 100 characters
//! - Emails: a single `@` separating a non-empty local part from a domain
//!   containing a dot, with no whitespace

/// Maximum allowed length for a contact name.
pub const CONTACT_NAME_MAX: usize = 100;

/// Validates a contact name against backend constraints.
///
/// Returns `true` if the name is non-empty after trimming and no longer than
/// [`CONTACT_NAME_MAX`] characters. Unlike account usernames, contact names
/// accept punctuation such as apostrophes and hyphens.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_contact_name;
///
/// assert!(is_valid_contact_name("Debra Garcia"));
/// assert!(is_valid_contact_name("O'Brien"));
/// assert!(!is_valid_contact_name("   "));
/// assert!(!is_valid_contact_name(""));
/// ```
#[must_use]
pub fn is_valid_contact_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= CONTACT_NAME_MAX
}

/// Validates an email address against backend constraints.
///
/// The check is deliberately shallow: a single `@` separating a non-empty
/// local part from a domain containing a dot, and no whitespace anywhere.
/// Full RFC 5322 parsing is out of scope for demo data.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("debra.garcia@example.com"));
/// assert!(!is_valid_email("no-at-sign"));
/// assert!(!is_valid_email("two@@example.com"));
/// assert!(!is_valid_email("spaced out@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

/// Derives an email local part from a contact name.
///
/// Lowercases the name, maps runs of non-alphanumeric characters to single
/// dots, and trims leading or trailing dots. Returns an empty string when the
/// name contains no alphanumeric characters.
#[must_use]
pub(crate) fn email_local_from_name(name: &str) -> String {
    let mut local = String::with_capacity(name.len());
    let mut pending_dot = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dot && !local.is_empty() {
                local.push('.');
            }
            pending_dot = false;
            local.push(c.to_ascii_lowercase());
        } else {
            pending_dot = true;
        }
    }
    local
}

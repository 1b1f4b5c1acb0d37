//! API handlers and shared utilities for Portero.
//!
//! This module organizes the route handlers and the small input helpers they
//! share.

pub mod admin;
pub mod auth;
pub mod health;
pub mod root;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Lightweight email sanity check used before touching the database.
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

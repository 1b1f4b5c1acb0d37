//! Password strength evaluation.
//!
//! Flow Overview:
//! 1) Check length, the four character classes, email similarity and the
//!    common-password list, collecting unmet requirements in a fixed order.
//! 2) Derive the score from what is missing: any length/email/common failure
//!    or two missing character classes is `weak`, one missing class is
//!    `medium`, nothing missing is `strong`.
//!
//! Evaluation is deterministic and never fails; callers decide what to do
//! with a weak result.

mod common;

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub use common::is_common_password;

pub const DEFAULT_MIN_LENGTH: usize = 8;

// Shorter local parts ("al", "bob") show up inside too many good passwords.
const EMAIL_SUBSTRING_MIN_LENGTH: usize = 4;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule a password can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Minimum number of characters.
    Length(usize),
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    /// Must not equal or embed the email address.
    NotEmail,
    /// Must not appear in the common-password list.
    NotCommon,
}

impl Requirement {
    /// Stable machine-readable code for clients that localize messages.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Length(_) => "length",
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Digit => "digit",
            Self::Symbol => "symbol",
            Self::NotEmail => "not_email",
            Self::NotCommon => "not_common",
        }
    }

    const fn is_character_class(self) -> bool {
        matches!(
            self,
            Self::Lowercase | Self::Uppercase | Self::Digit | Self::Symbol
        )
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(min) => write!(f, "Must be at least {min} characters long"),
            Self::Lowercase => f.write_str("Must contain a lowercase letter"),
            Self::Uppercase => f.write_str("Must contain an uppercase letter"),
            Self::Digit => f.write_str("Must contain a digit"),
            Self::Symbol => f.write_str("Must contain a symbol"),
            Self::NotEmail => f.write_str("Must not resemble your email address"),
            Self::NotCommon => f.write_str("Must not be a commonly used password"),
        }
    }
}

/// Outcome of a strength check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: Strength,
    pub unmet: Vec<Requirement>,
}

impl PasswordStrength {
    /// Human-readable unmet requirements, in evaluation order.
    #[must_use]
    pub fn requirements(&self) -> Vec<String> {
        self.unmet.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn is_unmet(&self, code: &str) -> bool {
        self.unmet.iter().any(|requirement| requirement.code() == code)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordPolicy {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }

    /// Zero is clamped to one so an empty password is never "long enough".
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length.max(1);
        self
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Evaluate `password`, optionally against the account email.
    #[must_use]
    pub fn evaluate(&self, password: &str, email: Option<&str>) -> PasswordStrength {
        let mut unmet = Vec::new();

        if password.chars().count() < self.min_length {
            unmet.push(Requirement::Length(self.min_length));
        }
        if !password.chars().any(char::is_lowercase) {
            unmet.push(Requirement::Lowercase);
        }
        if !password.chars().any(char::is_uppercase) {
            unmet.push(Requirement::Uppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            unmet.push(Requirement::Digit);
        }
        if !password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
        {
            unmet.push(Requirement::Symbol);
        }
        if email.is_some_and(|email| resembles_email(password, email)) {
            unmet.push(Requirement::NotEmail);
        }
        if is_common_password(password) {
            unmet.push(Requirement::NotCommon);
        }

        let score = score(&unmet);
        PasswordStrength { score, unmet }
    }
}

/// Evaluate with the default policy.
#[must_use]
pub fn evaluate(password: &str, email: Option<&str>) -> PasswordStrength {
    PasswordPolicy::default().evaluate(password, email)
}

fn score(unmet: &[Requirement]) -> Strength {
    let disqualified = unmet.iter().any(|requirement| {
        matches!(
            requirement,
            Requirement::Length(_) | Requirement::NotEmail | Requirement::NotCommon
        )
    });
    let missing_classes = unmet
        .iter()
        .filter(|requirement| requirement.is_character_class())
        .count();

    if disqualified || missing_classes >= 2 {
        Strength::Weak
    } else if missing_classes == 1 {
        Strength::Medium
    } else {
        Strength::Strong
    }
}

fn resembles_email(password: &str, email: &str) -> bool {
    let email = email.trim().to_lowercase();
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() {
        return false;
    }

    let candidate = password.trim().to_lowercase();
    if candidate == local || candidate == email {
        return true;
    }
    local.chars().count() >= EMAIL_SUBSTRING_MIN_LENGTH && candidate.contains(local)
}

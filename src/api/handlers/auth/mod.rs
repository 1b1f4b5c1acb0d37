//! Public auth helpers that do not require a session.

pub mod password_strength;
pub(crate) mod types;

pub use types::{PasswordStrengthRequest, PasswordStrengthResponse};

//! Request/response types for public auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::password::{PasswordStrength, Strength};

/// `email` is optional; when present the password is also checked against it.
#[derive(ToSchema, Deserialize, Default)]
pub struct PasswordStrengthRequest {
    pub password: Option<String>,
    pub email: Option<String>,
}

impl std::fmt::Debug for PasswordStrengthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordStrengthRequest")
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PasswordStrengthResponse {
    pub strength: Strength,
    /// Unmet requirements, empty for a strong password.
    pub requirements: Vec<String>,
}

impl From<PasswordStrength> for PasswordStrengthResponse {
    fn from(result: PasswordStrength) -> Self {
        Self {
            requirements: result.requirements(),
            strength: result.score,
        }
    }
}

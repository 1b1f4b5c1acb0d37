//! Request/response types for admin endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::token::AdminRole;

pub const DEFAULT_SESSIONS_LIMIT: i64 = 100;
pub const MAX_SESSIONS_LIMIT: i64 = 500;

/// Fields are optional so a missing one is a 400 with a message, not a
/// framework rejection.
#[derive(ToSchema, Deserialize, Default)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminLoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminLoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_at: String,
    pub role: AdminRole,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminVerifyResponse {
    pub admin_id: String,
    pub role: AdminRole,
    pub expires_at: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
    pub last_seen_at: Option<String>,
    pub expires_at: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(IntoParams, Deserialize, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct SessionsQuery {
    /// Page size (default 100, max 500).
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
}

impl SessionsQuery {
    /// Clamp paging to sane bounds.
    #[must_use]
    pub fn bounds(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_SESSIONS_LIMIT)
            .clamp(1, MAX_SESSIONS_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn sessions_query_defaults_and_clamps() {
        assert_eq!(SessionsQuery::default().bounds(), (100, 0));
        let query = SessionsQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(query.bounds(), (500, 0));
        let query = SessionsQuery {
            limit: Some(0),
            offset: Some(20),
        };
        assert_eq!(query.bounds(), (1, 20));
    }

    #[test]
    fn login_request_tolerates_missing_fields() -> Result<()> {
        let request: AdminLoginRequest = serde_json::from_str(r#"{"email":"a@example.com"}"#)?;
        assert_eq!(request.email.as_deref(), Some("a@example.com"));
        assert!(request.password.is_none());
        Ok(())
    }

    #[test]
    fn sessions_response_wraps_list() -> Result<()> {
        let response = SessionsResponse { sessions: vec![] };
        let value = serde_json::to_value(&response)?;
        assert!(value.get("sessions").is_some_and(serde_json::Value::is_array));
        Ok(())
    }
}

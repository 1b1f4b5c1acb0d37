use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use super::types::{PasswordStrengthRequest, PasswordStrengthResponse};
use crate::{
    api::handlers::{normalize_email, valid_email},
    password::PasswordPolicy,
};

#[utoipa::path(
    post,
    path = "/api/auth/check-password-strength",
    request_body = PasswordStrengthRequest,
    responses(
        (status = 200, description = "Strength classification and unmet requirements.", body = PasswordStrengthResponse),
        (status = 400, description = "Invalid payload, missing password or invalid email.", body = String),
    ),
    tag = "auth"
)]
pub async fn check_password_strength(
    policy: Extension<PasswordPolicy>,
    payload: Result<Json<PasswordStrengthRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected password strength payload: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, "Invalid payload".to_string()).into_response();
        }
    };

    let Some(password) = request.password else {
        return (StatusCode::BAD_REQUEST, "Missing password".to_string()).into_response();
    };

    // Blank email is treated as absent.
    let email = request
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty());
    if email.as_deref().is_some_and(|email| !valid_email(email)) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    let result = policy.evaluate(&password, email.as_deref());
    debug!(strength = result.score.as_str(), "Evaluated password strength");

    (StatusCode::OK, Json(PasswordStrengthResponse::from(result))).into_response()
}

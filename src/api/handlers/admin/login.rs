//! Admin login, logout and token introspection endpoints.
//!
//! Flow Overview:
//! 1) Validate the payload (400 with a message on missing fields).
//! 2) Look up the admin and verify the argon2 hash off the async runtime.
//! 3) Mint a short-lived admin token, return it and set the admin cookie.
//!
//! Unknown emails, wrong passwords and disabled accounts all return the same
//! bare 401.

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{InvalidHeaderValue, SET_COOKIE},
    },
    response::IntoResponse,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{
    credentials::{verify_dummy, verify_password},
    principal::{ADMIN_COOKIE_NAME, require_admin},
    state::{AdminConfig, AdminState},
    storage::{lookup_admin, touch_last_login},
    token::AdminRole,
    types::{AdminLoginRequest, AdminLoginResponse, AdminVerifyResponse},
};
use crate::api::handlers::{normalize_email, valid_email};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin authenticated; token also set as cookie.", body = AdminLoginResponse),
        (status = 400, description = "Missing or invalid input.", body = String),
        (status = 401, description = "Invalid credentials."),
        (status = 500, description = "Internal error."),
    ),
    tag = "admin"
)]
pub async fn admin_login(
    pool: Extension<PgPool>,
    admin_state: Extension<Arc<AdminState>>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid payload: {}", rejection.body_text()),
            )
                .into_response();
        }
    };

    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    if email.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing email".to_string()).into_response();
    }
    if !valid_email(&email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }
    let password = match request.password {
        Some(password) if !password.is_empty() => password,
        _ => return (StatusCode::BAD_REQUEST, "Missing password".to_string()).into_response(),
    };

    let record = match lookup_admin(&pool, &email).await {
        Ok(record) => record,
        Err(err) => {
            error!("Failed to lookup admin: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(record) = record else {
        run_blocking("dummy password verification", move || verify_dummy(&password)).await;
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let hash = record.password_hash.clone();
    let password_ok = run_blocking("password verification", move || {
        verify_password(&password, &hash)
    })
    .await
    .unwrap_or(false);
    if !password_ok || record.disabled {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let Some(role) = AdminRole::parse(&record.role) else {
        error!("Admin {} has unknown role: {}", record.id, record.role);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let token = match admin_state.token_signer().issue(
        record.id,
        role,
        admin_state.config().token_ttl_seconds(),
    ) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue admin token: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Err(err) = touch_last_login(&pool, record.id).await {
        warn!("Failed to record admin login: {err:#}");
    }

    info!(admin_id = %record.id, role = role.as_str(), "Admin logged in");

    let mut headers = HeaderMap::new();
    match admin_cookie(admin_state.config(), &token.token) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build admin cookie: {err}"),
    }

    let response = AdminLoginResponse {
        token: token.token,
        expires_at: token.expires_at,
        role,
    };
    (StatusCode::OK, headers, Json(response)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 204, description = "Admin cookie cleared.")
    ),
    tag = "admin"
)]
pub async fn admin_logout(admin_state: Extension<Arc<AdminState>>) -> impl IntoResponse {
    // Tokens are stateless; logging out only drops the cookie.
    let mut headers = HeaderMap::new();
    if let Ok(cookie) = clear_admin_cookie(admin_state.config()) {
        headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, headers).into_response()
}

#[utoipa::path(
    get,
    path = "/api/admin/verify",
    responses(
        (status = 200, description = "Admin token is valid.", body = AdminVerifyResponse),
        (status = 401, description = "Missing or invalid admin token."),
    ),
    tag = "admin"
)]
pub async fn admin_verify(
    headers: HeaderMap,
    admin_state: Extension<Arc<AdminState>>,
) -> impl IntoResponse {
    match require_admin(&headers, &admin_state) {
        Ok(claims) => {
            let response = AdminVerifyResponse {
                admin_id: claims.admin_id.to_string(),
                role: claims.role,
                expires_at: claims.exp,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(status) => status.into_response(),
    }
}

/// Run argon2 work on the blocking pool; a panicked task is logged and yields `None`.
async fn run_blocking<T, F>(task: &'static str, f: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => Some(value),
        Err(err) => {
            error!("Blocking {task} task failed: {err}");
            None
        }
    }
}

/// Build a `HttpOnly` cookie carrying the admin token.
pub(super) fn admin_cookie(
    config: &AdminConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.token_ttl_seconds();
    let mut cookie = format!(
        "{ADMIN_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={ttl_seconds}"
    );
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_admin_cookie(config: &AdminConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{ADMIN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

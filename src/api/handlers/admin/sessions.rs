//! Admin view over user sessions.

use axum::{
    Json,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{
    principal::{require_admin, require_role},
    state::AdminState,
    storage::{delete_session, fetch_active_sessions},
    token::AdminRole,
    types::{SessionsQuery, SessionsResponse},
};

#[utoipa::path(
    get,
    path = "/api/admin/sessions",
    params(SessionsQuery),
    responses(
        (status = 200, description = "Active user sessions, newest first.", body = SessionsResponse),
        (status = 400, description = "Invalid paging parameters.", body = String),
        (status = 401, description = "Missing or invalid admin token."),
        (status = 500, description = "Internal error."),
    ),
    tag = "admin"
)]
pub async fn list_sessions(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    admin_state: Extension<Arc<AdminState>>,
    query: Result<Query<SessionsQuery>, QueryRejection>,
) -> impl IntoResponse {
    // Authenticate before looking at anything else the caller sent.
    if let Err(status) = require_admin(&headers, &admin_state) {
        return status.into_response();
    }

    let Ok(Query(query)) = query else {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid paging parameters".to_string(),
        )
            .into_response();
    };
    let (limit, offset) = query.bounds();

    match fetch_active_sessions(&pool, limit, offset).await {
        Ok(sessions) => (StatusCode::OK, Json(SessionsResponse { sessions })).into_response(),
        Err(err) => {
            error!("Failed to list sessions: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session revoked."),
        (status = 400, description = "Invalid session id."),
        (status = 401, description = "Missing or invalid admin token."),
        (status = 403, description = "Admin role required."),
        (status = 404, description = "Session not found."),
        (status = 500, description = "Internal error."),
    ),
    tag = "admin"
)]
pub async fn revoke_session(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    admin_state: Extension<Arc<AdminState>>,
) -> impl IntoResponse {
    let claims = match require_role(&headers, &admin_state, AdminRole::Admin) {
        Ok(claims) => claims,
        Err(status) => return status.into_response(),
    };

    let Ok(session_id) = Uuid::parse_str(id.trim()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match delete_session(&pool, session_id).await {
        Ok(true) => {
            info!(admin_id = %claims.admin_id, %session_id, "Session revoked");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to revoke session: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

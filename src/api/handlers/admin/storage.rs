//! Database helpers for admin accounts and user sessions.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::SessionSummary;

/// Minimal fields needed to authenticate an admin.
pub(super) struct AdminRecord {
    pub(super) id: Uuid,
    pub(super) password_hash: String,
    pub(super) role: String,
    pub(super) disabled: bool,
}

fn query_span(operation: &'static str, statement: &'static str) -> tracing::Span {
    tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

/// Look up an admin by normalized email.
pub(super) async fn lookup_admin(pool: &PgPool, email: &str) -> Result<Option<AdminRecord>> {
    let query = "SELECT id, password_hash, role, disabled FROM admins WHERE email = $1";
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(query_span("SELECT", query))
        .await
        .context("failed to lookup admin")?;

    Ok(row.map(|row| AdminRecord {
        id: row.get("id"),
        password_hash: row.get("password_hash"),
        role: row.get("role"),
        disabled: row.get("disabled"),
    }))
}

pub(super) async fn touch_last_login(pool: &PgPool, admin_id: Uuid) -> Result<()> {
    let query = "UPDATE admins SET last_login_at = NOW() WHERE id = $1";
    sqlx::query(query)
        .bind(admin_id)
        .execute(pool)
        .instrument(query_span("UPDATE", query))
        .await
        .context("failed to update admin last login")?;
    Ok(())
}

/// Unexpired user sessions, newest first.
pub(super) async fn fetch_active_sessions(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<SessionSummary>> {
    let query = r#"
        SELECT
            s.id::text AS id,
            s.user_id::text AS user_id,
            u.email,
            s.ip_address,
            s.user_agent,
            to_char(s.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
            CASE
                WHEN s.last_seen_at IS NULL THEN NULL
                ELSE to_char(s.last_seen_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"')
            END AS last_seen_at,
            to_char(s.expires_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS expires_at
        FROM user_sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.expires_at > NOW()
        ORDER BY s.created_at DESC
        LIMIT $1 OFFSET $2
    "#;
    let rows = sqlx::query(query)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .instrument(query_span("SELECT", query))
        .await
        .context("failed to list sessions")?;

    Ok(rows
        .into_iter()
        .map(|row| SessionSummary {
            id: row.get("id"),
            user_id: row.get("user_id"),
            email: row.get("email"),
            ip_address: row.get("ip_address"),
            user_agent: row.get("user_agent"),
            created_at: row.get("created_at"),
            last_seen_at: row.get("last_seen_at"),
            expires_at: row.get("expires_at"),
        })
        .collect())
}

/// Delete a session by id; `false` when nothing matched.
pub(super) async fn delete_session(pool: &PgPool, session_id: Uuid) -> Result<bool> {
    let query = "DELETE FROM user_sessions WHERE id = $1";
    let result = sqlx::query(query)
        .bind(session_id)
        .execute(pool)
        .instrument(query_span("DELETE", query))
        .await
        .context("failed to delete session")?;
    Ok(result.rows_affected() > 0)
}

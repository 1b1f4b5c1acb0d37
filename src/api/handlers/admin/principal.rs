//! Admin token extraction and authorization helpers.
//!
//! Flow Overview: read the bearer header (or the admin cookie), verify the
//! token, and hand the claims to the handler. Every failure collapses into
//! "unauthenticated"; the reason is only logged at debug level.

use axum::http::{
    HeaderMap, StatusCode,
    header::{AUTHORIZATION, COOKIE},
};
use tracing::debug;

use super::{
    state::AdminState,
    token::{AdminClaims, AdminRole},
};

pub const ADMIN_COOKIE_NAME: &str = "portero_admin";

/// Verify the admin token carried by a request.
///
/// Returns `None` for missing, malformed, expired or forged tokens.
pub fn verify_admin(headers: &HeaderMap, admin_state: &AdminState) -> Option<AdminClaims> {
    let token = extract_admin_token(headers)?;
    match admin_state.token_signer().verify(&token) {
        Ok(claims) => Some(claims),
        Err(err) => {
            debug!("Rejected admin token: {err}");
            None
        }
    }
}

/// Resolve the request into admin claims, or return 401.
pub fn require_admin(
    headers: &HeaderMap,
    admin_state: &AdminState,
) -> Result<AdminClaims, StatusCode> {
    verify_admin(headers, admin_state).ok_or(StatusCode::UNAUTHORIZED)
}

/// Like [`require_admin`], but also return 403 when the role is insufficient.
pub fn require_role(
    headers: &HeaderMap,
    admin_state: &AdminState,
    required: AdminRole,
) -> Result<AdminClaims, StatusCode> {
    let claims = require_admin(headers, admin_state)?;
    if claims.role.allows(required) {
        Ok(claims)
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

pub(crate) fn extract_admin_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let value = headers.get(COOKIE)?.to_str().ok()?;
    value.split(';').find_map(|pair| {
        let (key, val) = pair.trim().split_once('=')?;
        let val = val.trim();
        (key.trim() == ADMIN_COOKIE_NAME && !val.is_empty()).then(|| val.to_string())
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

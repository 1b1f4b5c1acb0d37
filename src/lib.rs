//! # Portero (Admin Dashboard API)
//!
//! `portero` is the backend for an admin dashboard. It authenticates
//! administrators, hands out short-lived signed admin tokens, and lets them
//! inspect and revoke user sessions stored in Postgres.
//!
//! ## Admin Tokens
//!
//! Admin tokens are `v4.public.` tokens signed with Ed25519. They carry the
//! admin id, role and expiry. Verification is local and fails closed: a
//! missing, malformed, tampered or expired token is simply "unauthenticated"
//! and the caller gets a bare `401 Unauthorized`.
//!
//! Tokens are read from `Authorization: Bearer <token>` first and from the
//! `portero_admin` cookie second.
//!
//! ## Password Strength
//!
//! `POST /api/auth/check-password-strength` classifies a candidate password
//! as `weak`, `medium` or `strong` and returns the requirements it misses.
//! The evaluation is a pure function, see [`password::evaluate`].

pub mod api;
pub mod cli;
pub mod password;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

//! Admin dashboard handlers and supporting modules.
//!
//! Admins authenticate with email and password and receive a short-lived
//! `v4.public` token, returned in the response body and set as the
//! `portero_admin` cookie. Every admin endpoint accepts either transport,
//! checking `Authorization: Bearer` first.
//!
//! ## Roles
//!
//! - `viewer` can read (`GET /api/admin/sessions`, `GET /api/admin/verify`).
//! - `admin` can also revoke sessions.
//!
//! ## Signing key
//!
//! Tokens are signed with an Ed25519 key derived from a 32-byte seed. Without a
//! configured seed a random key is generated at startup, so tokens do not
//! survive restarts and are not accepted by other instances.

pub(crate) mod credentials;
pub mod login;
pub(crate) mod principal;
pub mod sessions;
mod state;
mod storage;
pub mod token;
pub(crate) mod types;

pub use credentials::hash_password;
pub use principal::{ADMIN_COOKIE_NAME, require_admin, require_role, verify_admin};
pub use state::{AdminConfig, AdminState};
pub use token::{AdminClaims, AdminRole, AdminTokenSigner, TokenError};

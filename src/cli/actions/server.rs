use crate::{
    api::{
        self, ServerConfig,
        handlers::admin::{AdminConfig, AdminState, AdminTokenSigner},
    },
    password::PasswordPolicy,
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub frontend_base_url: String,
    pub admin_token_seed: Option<SecretString>,
    pub admin_token_ttl_seconds: i64,
    pub admin_cookie_secure: bool,
    pub password_min_length: usize,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the signing key is invalid, the database is unreachable,
/// or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let token_signer = match &args.admin_token_seed {
        Some(seed) => AdminTokenSigner::from_base64_seed(seed.expose_secret())
            .context("Invalid PORTERO_ADMIN_TOKEN_SEED")?,
        None => {
            warn!("No admin token seed configured; using a random key, tokens will not survive restarts");
            AdminTokenSigner::generate()?
        }
    };
    debug!(kid = token_signer.key_id(), "Admin token signer ready");

    let admin_config = AdminConfig::new()
        .with_token_ttl_seconds(args.admin_token_ttl_seconds)
        .with_cookie_secure(args.admin_cookie_secure);
    let admin_state = AdminState::new(admin_config, token_signer);

    let policy = PasswordPolicy::new().with_min_length(args.password_min_length);

    api::new(
        ServerConfig {
            port: args.port,
            dsn: args.dsn,
            frontend_base_url: args.frontend_base_url,
        },
        admin_state,
        policy,
    )
    .await
}

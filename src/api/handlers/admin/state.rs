//! Admin configuration and shared state.

use super::token::AdminTokenSigner;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 8 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AdminConfig {
    token_ttl_seconds: i64,
    cookie_secure: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            cookie_secure: false,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}

#[derive(Debug)]
pub struct AdminState {
    config: AdminConfig,
    token_signer: AdminTokenSigner,
}

impl AdminState {
    /// The signer accepts tokens up to the configured ttl, never longer.
    #[must_use]
    pub fn new(config: AdminConfig, token_signer: AdminTokenSigner) -> Self {
        let token_signer = token_signer.with_max_ttl_seconds(config.token_ttl_seconds());
        Self {
            config,
            token_signer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    #[must_use]
    pub fn token_signer(&self) -> &AdminTokenSigner {
        &self.token_signer
    }
}

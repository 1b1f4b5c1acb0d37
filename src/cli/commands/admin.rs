use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_ADMIN_TOKEN_SEED: &str = "admin-token-seed";
pub const ARG_ADMIN_TOKEN_TTL_SECONDS: &str = "admin-token-ttl-seconds";
pub const ARG_ADMIN_COOKIE_SECURE: &str = "admin-cookie-secure";

pub const CMD_HASH_PASSWORD: &str = "hash-password";
pub const ARG_ADMIN_PASSWORD: &str = "password";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long("frontend-base-url")
                .help("Dashboard base URL, used as the only allowed CORS origin")
                .env("PORTERO_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new(ARG_ADMIN_TOKEN_SEED)
                .long("admin-token-seed")
                .help("Base64 32-byte seed for the admin token signing key")
                .long_help(
                    "Base64 32-byte seed for the admin token signing key. When unset a random key is generated at startup and tokens do not survive restarts.",
                )
                .env("PORTERO_ADMIN_TOKEN_SEED")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ADMIN_TOKEN_TTL_SECONDS)
                .long("admin-token-ttl-seconds")
                .help("Admin token TTL in seconds")
                .env("PORTERO_ADMIN_TOKEN_TTL_SECONDS")
                .default_value("28800")
                .value_parser(clap::value_parser!(i64).range(60..=86_400)),
        )
        .arg(
            Arg::new(ARG_ADMIN_COOKIE_SECURE)
                .long("admin-cookie-secure")
                .help("Mark the admin cookie Secure (HTTPS only)")
                .env("PORTERO_ADMIN_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
}

#[must_use]
pub fn hash_password_command() -> Command {
    Command::new(CMD_HASH_PASSWORD)
        .about("Print an argon2 hash for seeding the admins table")
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long("password")
                .help("Password to hash (read from stdin when unset)")
                .env("PORTERO_ADMIN_PASSWORD")
                .hide_env_values(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
    pub token_seed: Option<SecretString>,
    pub token_ttl_seconds: i64,
    pub cookie_secure: bool,
}

impl Options {
    /// Parse admin arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the frontend base URL is blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let frontend_base_url = match matches.get_one::<String>(ARG_FRONTEND_BASE_URL) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => bail!("missing required argument: --{ARG_FRONTEND_BASE_URL}"),
        };

        // clap passes through empty env vars; treat them as unset.
        let token_seed = matches
            .get_one::<String>(ARG_ADMIN_TOKEN_SEED)
            .map(|seed| seed.trim())
            .filter(|seed| !seed.is_empty())
            .map(|seed| SecretString::from(seed.to_string()));

        Ok(Self {
            frontend_base_url,
            token_seed,
            token_ttl_seconds: matches
                .get_one::<i64>(ARG_ADMIN_TOKEN_TTL_SECONDS)
                .copied()
                .unwrap_or(28_800),
            cookie_secure: matches.get_flag(ARG_ADMIN_COOKIE_SECURE),
        })
    }
}

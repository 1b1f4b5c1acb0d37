//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary runs: the API server
//! or the offline `hash-password` helper.

use crate::cli::actions::{Action, hash_password, server};
use crate::cli::commands::{ARG_DSN, ARG_PORT, admin, password};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let password_opts = password::Options::parse(matches);

    if let Some(sub_matches) = matches.subcommand_matches(admin::CMD_HASH_PASSWORD) {
        let password = sub_matches
            .get_one::<String>(admin::ARG_ADMIN_PASSWORD)
            .cloned()
            .map(SecretString::from);
        return Ok(Action::HashPassword(hash_password::Args {
            password,
            min_length: password_opts.min_length,
        }));
    }

    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .filter(|dsn| !dsn.trim().is_empty())
        .map(SecretString::from)
        .context("missing required argument: --dsn")?;

    let admin_opts = admin::Options::parse(matches)?;

    Ok(Action::Server(server::Args {
        port,
        dsn,
        frontend_base_url: admin_opts.frontend_base_url,
        admin_token_seed: admin_opts.token_seed,
        admin_token_ttl_seconds: admin_opts.token_ttl_seconds,
        admin_cookie_secure: admin_opts.cookie_secure,
        password_min_length: password_opts.min_length,
    }))
}

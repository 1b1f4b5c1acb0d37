use crate::{
    api::handlers::admin::hash_password,
    password::{PasswordPolicy, Strength},
};
use anyhow::{Context, Result, bail};
use secrecy::{ExposeSecret, SecretString};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug)]
pub struct Args {
    pub password: Option<SecretString>,
    pub min_length: usize,
}

/// Hash an admin password and print the PHC string to stdout.
///
/// Weak passwords are still hashed; the unmet requirements go to stderr.
/// # Errors
/// Returns an error if no password is provided or hashing fails.
pub async fn execute(args: Args) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_stdin_line().await?,
    };
    if password.expose_secret().is_empty() {
        bail!("password must not be empty");
    }

    let strength = PasswordPolicy::new()
        .with_min_length(args.min_length)
        .evaluate(password.expose_secret(), None);
    if strength.score != Strength::Strong {
        eprintln!("warning: password strength is {}", strength.score);
        for requirement in strength.requirements() {
            eprintln!("  - {requirement}");
        }
    }

    let phc = hash_password(password.expose_secret())?;
    println!("{phc}");
    Ok(())
}

async fn read_stdin_line() -> Result<SecretString> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::from(password))
}

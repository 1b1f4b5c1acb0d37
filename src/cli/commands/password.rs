use crate::password::DEFAULT_MIN_LENGTH;
use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};

pub const ARG_PASSWORD_MIN_LENGTH: &str = "password-min-length";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_PASSWORD_MIN_LENGTH)
            .long("password-min-length")
            .help("Minimum password length for strength checks")
            .env("PORTERO_PASSWORD_MIN_LENGTH")
            .global(true)
            .default_value("8")
            .value_parser(RangedU64ValueParser::<usize>::new().range(1..=128)),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub min_length: usize,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            min_length: matches
                .get_one::<usize>(ARG_PASSWORD_MIN_LENGTH)
                .copied()
                .unwrap_or(DEFAULT_MIN_LENGTH),
        }
    }
}

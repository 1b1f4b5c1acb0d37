use crate::cli::telemetry::{DEFAULT_SERVICE_NAME, LogFormat, TelemetryConfig};
use clap::{Arg, ArgMatches, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_FORMAT: &str = "log-format";
pub const ARG_SERVICE_NAME: &str = "service-name";
pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_OTLP_ENDPOINT: &str = "otlp-endpoint";
pub const ARG_OTLP_HEADERS: &str = "otlp-headers";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORTERO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_FORMAT)
                .long("log-format")
                .help("Log output format")
                .env("PORTERO_LOG_FORMAT")
                .global(true)
                .default_value("pretty")
                .value_parser(["pretty", "json"]),
        )
        .arg(
            Arg::new(ARG_SERVICE_NAME)
                .long("service-name")
                .help("Service name reported on exported traces")
                .env("PORTERO_SERVICE_NAME")
                .global(true)
                .default_value(DEFAULT_SERVICE_NAME),
        )
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long("environment")
                .help("Deployment environment reported on exported traces, e.g. production")
                .env("PORTERO_ENVIRONMENT")
                .global(true),
        )
        .arg(
            Arg::new(ARG_OTLP_ENDPOINT)
                .long("otlp-endpoint")
                .help("OTLP/gRPC collector endpoint; traces are exported only when set")
                .env("OTEL_EXPORTER_OTLP_ENDPOINT")
                .global(true),
        )
        .arg(
            Arg::new(ARG_OTLP_HEADERS)
                .long("otlp-headers")
                .help("Extra OTLP metadata as comma separated key=value pairs")
                .env("OTEL_EXPORTER_OTLP_HEADERS")
                .global(true)
                .hide_env_values(true),
        )
}

/// Selected log format, `pretty` unless told otherwise.
#[must_use]
pub fn log_format(matches: &ArgMatches) -> LogFormat {
    match matches.get_one::<String>(ARG_LOG_FORMAT).map(String::as_str) {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

/// Collect the telemetry settings for `verbosity`.
#[must_use]
pub fn telemetry_config(matches: &ArgMatches, verbosity: Option<Level>) -> TelemetryConfig {
    let optional = |id: &str| {
        matches
            .get_one::<String>(id)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    TelemetryConfig {
        verbosity,
        format: log_format(matches),
        service_name: optional(ARG_SERVICE_NAME)
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        environment: optional(ARG_ENVIRONMENT),
        otlp_endpoint: optional(ARG_OTLP_ENDPOINT),
        otlp_headers: optional(ARG_OTLP_HEADERS),
    }
}

//! Logging and optional OTLP trace export.
//!
//! Logs always go to stdout (pretty or JSON). Spans are additionally exported
//! over OTLP/gRPC when an OTLP endpoint is configured.

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::propagation::TextMapCompositePropagator;
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    propagation::{BaggagePropagator, TraceContextPropagator},
    trace::{SdkTracerProvider, Tracer},
};
use std::time::Duration;
use tonic::{
    metadata::{Ascii, MetadataKey, MetadataMap, MetadataValue},
    transport::ClientTlsConfig,
};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};
use ulid::Ulid;
use url::Url;

pub const DEFAULT_SERVICE_NAME: &str = "portero";

/// Noisy dependency targets held at a fixed level.
const QUIET_TARGETS: &[&str] = &[
    "hyper=error",
    "h2=error",
    "tokio=error",
    "tower=warn",
    "tonic=warn",
    "sqlx=warn",
    "opentelemetry_sdk=warn",
];

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging and tracing settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub verbosity: Option<Level>,
    pub format: LogFormat,
    pub service_name: String,
    pub environment: Option<String>,
    pub otlp_endpoint: Option<String>,
    /// `key=value` pairs sent as gRPC metadata, comma separated.
    pub otlp_headers: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            verbosity: None,
            format: LogFormat::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            environment: None,
            otlp_endpoint: None,
            otlp_headers: None,
        }
    }
}

impl TelemetryConfig {
    fn filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::builder()
            .with_default_directive(self.verbosity.unwrap_or(Level::ERROR).into())
            .from_env_lossy();
        for directive in QUIET_TARGETS {
            filter = filter.add_directive(directive.parse()?);
        }
        Ok(filter)
    }

    fn resource_attributes(&self, instance_id: String) -> Vec<KeyValue> {
        let mut attributes = vec![
            KeyValue::new("service.name", self.service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("service.instance.id", instance_id),
        ];
        if let Some(environment) = &self.environment {
            attributes.push(KeyValue::new(
                "deployment.environment.name",
                environment.clone(),
            ));
        }
        attributes
    }
}

/// OTLP endpoints without a scheme are dialed over TLS.
fn otlp_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim().trim_end_matches('/');
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    let url = Url::parse(&with_scheme).with_context(|| format!("invalid OTLP endpoint: {raw}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("unsupported OTLP endpoint scheme: {other}")),
    }
}

fn otlp_metadata(raw: &str) -> Result<MetadataMap> {
    let mut metadata = MetadataMap::new();
    for pair in raw.split(',').filter(|pair| !pair.trim().is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("OTLP header without '=': {}", pair.trim()))?;
        let key = key.trim().to_ascii_lowercase();
        let name = MetadataKey::<Ascii>::from_bytes(key.as_bytes())
            .map_err(|e| anyhow!("invalid OTLP header name {key}: {e}"))?;
        let value: MetadataValue<Ascii> = value
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid OTLP header value for {key}: {e}"))?;
        metadata.insert(name, value);
    }
    Ok(metadata)
}

fn init_tracer(config: &TelemetryConfig, endpoint: &Url) -> Result<Tracer> {
    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.as_str().trim_end_matches('/'))
        .with_compression(Compression::Gzip)
        .with_timeout(Duration::from_secs(3));

    if endpoint.scheme() == "https" {
        if let Some(host) = endpoint.host_str() {
            let tls = ClientTlsConfig::new()
                .domain_name(host.to_string())
                .with_native_roots();
            builder = builder.with_tls_config(tls);
        }
    }

    if let Some(headers) = config.otlp_headers.as_deref() {
        builder = builder.with_metadata(otlp_metadata(headers)?);
    }

    let exporter = builder.build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder_empty()
                .with_attributes(config.resource_attributes(Ulid::new().to_string()))
                .build(),
        )
        .build();

    let _ = TRACER_PROVIDER.set(provider.clone());

    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]));

    Ok(provider.tracer(config.service_name.clone()))
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false);

    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
    }
}

/// Install the global subscriber, exporting spans when an endpoint is set.
///
/// # Errors
///
/// Returns an error if the endpoint, headers or filter directives are invalid,
/// or a global subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<()> {
    let filter = config.filter()?;

    match config.otlp_endpoint.as_deref() {
        Some(raw) => {
            let endpoint = otlp_endpoint(raw)?;
            let tracer = init_tracer(config, &endpoint)?;
            let subscriber = Registry::default()
                .with(fmt_layer(config.format))
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
            debug!(endpoint = %endpoint, "Exporting traces over OTLP");
        }
        None => {
            let subscriber = Registry::default()
                .with(fmt_layer(config.format))
                .with(filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

/// Flush and shut down the tracer provider (noop if not initialized)
pub fn shutdown_tracer() {
    if let Some(tp) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        let _ = tp.shutdown();
    }
}

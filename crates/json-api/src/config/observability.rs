//! Logging, Tracing & Request Logging Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable logs for a terminal.
    Compact,

    /// One JSON object per line for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Tracing export and request logging settings.
///
/// Export is off by default since most tills run without a collector.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP
    #[arg(long, env = "OTEL_ENABLED")]
    pub otel_enabled: bool,

    /// Continue traces from an incoming `traceparent` header
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED")]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC endpoint
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = "http://localhost:4317")]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP export timeout in seconds
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// `service.name` resource attribute
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "till-json")]
    pub otel_service_name: String,

    /// `service.version` resource attribute
    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    /// `deployment.environment.name` resource attribute, e.g. a store code
    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Fraction of root traces to sample, between 0 and 1
    #[arg(
        long,
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0,
        value_parser = parse_sample_ratio
    )]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this many milliseconds are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

fn parse_sample_ratio(value: &str) -> Result<f64, String> {
    let ratio: f64 = value
        .parse()
        .map_err(|source| format!("not a number: {source}"))?;

    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("{ratio} is outside 0..=1"))
    }
}

//! Logging subscriber initialisation.
//!
//! Compact or JSON `fmt` output, with an OpenTelemetry layer when export is on.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, ServerConfig};

use super::ObservabilityError;

/// Dependencies that are noisy at `info` and only interesting when failing.
const QUIET_TARGETS: [&str; 5] = ["sqlx", "h2", "hyper", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let fmt_layer = match config.logging.log_format {
        LogFormat::Compact => fmt_layer
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .with(env_filter(&config.logging.log_level))
        .try_init()?;

    Ok(())
}

/// `RUST_LOG` wins; otherwise `level` with [`QUIET_TARGETS`] held at `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |directives, target| format!("{directives},{target}=warn"))
}

//! Subscriber setup.
//!
//! Wires `tracing` macros through an [`EnvFilter`] into the OpenTelemetry
//! layer, whose provider exports to the trace file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every exported span.
pub const SERVICE_NAME: &str = "zfsguard";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zfsguard-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `/data/zfsguard-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything, so
/// calling it more than once is harmless.
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read. Invalid
///   directives fall back to `"info"`.
///
/// ```rust
/// use zfsguard::observability::init_tracing;
/// use zfsguard::Config;
///
/// let config = Config {
///     trace_level: Some("zfsguard=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

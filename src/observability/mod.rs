//! OpenTelemetry tracing with file-based OTLP export.
//!
//! The plugin runs inside a WASI sandbox with no network, so spans are
//! serialized as OTLP JSON and appended to a rotating file in the plugin's
//! data folder instead of being shipped to a collector.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → zfsguard-otlp.json
//! ```
//!
//! - Output: `/data/zfsguard-otlp.json`, one OTLP document per exported batch
//! - Rotation: 10 MiB per file, 3 numbered backups
//! - Level: `trace_level` from the plugin configuration, `"info"` otherwise
//!
//! Both the plugin thread and the worker thread call [`init_tracing`]; the
//! worker re-attaches the plugin's span context so its spans join the same
//! trace.
//!
//! ```rust
//! use zfsguard::observability::init_tracing;
//! use zfsguard::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin loaded");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};

//! Tracer provider backed by a file exporter.
//!
//! Spans never leave the sandbox: the exporter appends each batch as an OTLP
//! JSON line to the rotating trace file in the plugin data folder.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one OTLP JSON line.
struct FileSpanExporter {
    /// Rotating trace file.
    writer: FileWriter,
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter appending to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Trace file, opened lazily on the first export
    /// * `resource` - Service name and version written with every batch
    fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Encodes `batch` and appends it as one line.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` after shutdown, or when the write or rotation fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let line = self.formatter.format_batch(&batch).to_string();
        let result = self
            .writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    /// Stops further exports. The file handle closes when the writer drops.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// Rebuilds the formatter so later batches carry `res`.
    fn set_resource(&mut self, res: &Resource) {
        self.formatter = SpanFormatter::new(res.clone());
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span immediately.
///
/// The plugin has no background runtime to drive a batch processor, so the
/// simple (synchronous) exporter is used.
///
/// # Parameters
///
/// * `file_path` - Trace file inside the plugin data folder
/// * `resource` - Service name and version attached to every span
///
/// # Returns
///
/// A provider ready to hand a tracer to `tracing-opentelemetry`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use opentelemetry::KeyValue;

    fn exporter(dir: &tempfile::TempDir) -> (FileSpanExporter, PathBuf) {
        let path = dir.path().join("trace.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "zfsguard")]);
        (FileSpanExporter::new(path.clone(), resource), path)
    }

    #[test]
    fn export_appends_one_document_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let (mut exporter, path) = exporter(&dir);

        for _ in 0..2 {
            let result = exporter.export(Vec::new()).now_or_never().unwrap();
            assert!(result.is_ok());
        }

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let doc: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(doc["resourceSpans"][0]["scopeSpans"][0]["spans"].is_array());
    }

    #[test]
    fn export_after_shutdown_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut exporter, path) = exporter(&dir);

        exporter.shutdown();
        let result = exporter.export(Vec::new()).now_or_never().unwrap();
        assert!(result.is_err());
        assert!(!path.exists());
    }
}

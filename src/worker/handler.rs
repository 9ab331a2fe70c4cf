//! Worker thread implementation for health report reads.
//!
//! Reading the report touches the host filesystem, so it runs on a Zellij worker
//! thread rather than in the plugin's update loop. The result is posted back to
//! the plugin as a JSON [`WorkerResponse`]. Trace context is re-attached so the
//! worker's spans join the plugin's trace.

use crate::domain::error::{Result, ZfsGuardError};
use crate::domain::HealthReport;
use crate::storage::{JsonReportStore, ReportStore};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// The report store is initialized lazily on first message receipt.
#[derive(Serialize, Deserialize, Default)]
pub struct ZfsGuardWorker {
    #[serde(skip)]
    store: Option<Box<dyn ReportStore>>,
}

impl ZfsGuardWorker {
    /// Creates a worker reading through `store`.
    #[must_use]
    pub fn with_store(store: Box<dyn ReportStore>) -> Self {
        Self { store: Some(store) }
    }

    fn store(&mut self) -> &dyn ReportStore {
        &**self
            .store
            .get_or_insert_with(|| Box::new(JsonReportStore::new()) as Box<dyn ReportStore>)
    }

    fn handle_load_report(&mut self, path: &str, generation: u64) -> WorkerResponse {
        let result: Result<HealthReport> = self.store().read_report(path);
        match result {
            Ok(report) => {
                tracing::debug!(generation, "report read successful");
                WorkerResponse::ReportLoaded { generation, report }
            }
            Err(e) => {
                tracing::debug!(generation, error = %e, "report read failed");
                let message = match e {
                    ZfsGuardError::ReportUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                WorkerResponse::ReportUnavailable {
                    generation,
                    message,
                }
            }
        }
    }

    /// Re-attaches the plugin's span as the remote parent of this thread's spans.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadReport {
                path, generation, ..
            } => self.handle_load_report(&path, generation),
        }
    }
}

fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ZfsGuardWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// Deserializes the [`WorkerMessage`] payload, processes it, and posts the
    /// serialized [`WorkerResponse`] back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that reads the health report. It
//! also implements distributed tracing context propagation across thread boundaries.

use crate::domain::HealthReport;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// Generates builder methods for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_report(LoadReport { path: String, generation: u64 }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read the health report at `path` (a sandbox path under `/host`).
    LoadReport {
        path: String,

        /// Echoed back so stale answers can be discarded.
        generation: u64,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The trace context carried by any variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadReport { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The report was read and parsed.
    ReportLoaded {
        generation: u64,
        report: HealthReport,
    },

    /// The report could not be read or parsed.
    ReportUnavailable {
        generation: u64,

        /// Human-readable reason.
        message: String,
    },
}

//! OTLP JSON encoding of finished spans.
//!
//! Output follows the OTLP/JSON trace shape (`resourceSpans` → `scopeSpans` →
//! `spans`), so a batch line can be fed to any collector that accepts OTLP
//! file input.

use super::init::SERVICE_NAME;
use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes span batches for one resource (service name and version).
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    /// Creates a formatter for spans produced by `resource`.
    ///
    /// # Parameters
    ///
    /// * `resource` - Resource attributes copied into every document
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Encodes `batch` as a single OTLP document under the `zfsguard` scope.
    ///
    /// The document holds one `resourceSpans` entry carrying the resource
    /// attributes, and one `scopeSpans` entry named after the plugin and
    /// tagged with the crate version. An empty batch still produces the
    /// envelope with an empty `spans` array.
    ///
    /// # Parameters
    ///
    /// * `batch` - Finished spans handed over by the exporter
    ///
    /// # Returns
    ///
    /// The OTLP document; the exporter writes its `to_string()` as one line.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| json!({ "key": k.to_string(), "value": attribute_value(v) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": {
                        "name": SERVICE_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                    "spans": spans
                }]
            }]
        })
    }
}

/// Encodes one span.
///
/// Trace and span ids are lowercase hex, root spans get an empty
/// `parentSpanId`, and the status code follows OTLP (0 unset, 1 ok, 2 error).
fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = status(&span.status);
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": span_kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": events(&span.events),
        "links": links(&span.links),
        "status": {
            "code": status_code,
            "message": status_message,
        },
    })
}

/// Nanoseconds since the epoch as a decimal string (OTLP encodes 64-bit
/// integers as strings). Times before the epoch clamp to `"0"`.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

const fn span_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": attribute_value(&kv.value) }))
        .collect()
}

/// OTLP `AnyValue`; arrays are flattened to their display string.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn events(events: &[Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attributes(&event.attributes),
            })
        })
        .collect()
}

fn links(links: &[Link]) -> Vec<JsonValue> {
    links
        .iter()
        .map(|link| {
            json!({
                "traceId": format!("{:032x}", link.span_context.trace_id()),
                "spanId": format!("{:016x}", link.span_context.span_id()),
                "attributes": attributes(&link.attributes),
            })
        })
        .collect()
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

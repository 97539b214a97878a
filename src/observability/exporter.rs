//! Span exporter writing one JSON record per finished span.
//!
//! Records are flat and self-contained so the trace file can be read with
//! `jq` or any line-oriented tool:
//!
//! ```json
//! {"service":"gallery-admin","name":"save","trace_id":"…","span_id":"…",
//!  "parent_span_id":null,"kind":"internal","start_unix_nano":1718000000000000000,
//!  "duration_us":1834,"attributes":{"entry_id":"beach-day"},
//!  "events":[{"name":"entry saved","time_unix_nano":…,"attributes":{…}}],
//!  "status":"unset"}
//! ```

use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

struct JsonFileExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: bool,
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            batch
                .iter()
                .map(|span| span_record(&self.service, span).to_string())
                .try_for_each(|line| self.file.write_line(&line))
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(name) = resource.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service = name.as_str().into_owned();
        }
    }
}

impl std::fmt::Debug for JsonFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports every span, as it ends, to `path`.
pub fn tracer_provider(path: impl Into<PathBuf>, service: &str) -> TracerProvider {
    let exporter = JsonFileExporter {
        file: RotatingFile::new(path),
        service: service.to_string(),
        is_shutdown: false,
    };
    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn span_record(service: &str, span: &SpanData) -> JsonValue {
    let parent = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
    let duration_us = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "time_unix_nano": unix_nanos(event.timestamp),
                "attributes": attributes(&event.attributes),
            })
        })
        .collect();

    json!({
        "service": service,
        "name": span.name,
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "parent_span_id": parent,
        "kind": format!("{:?}", span.span_kind).to_lowercase(),
        "start_unix_nano": unix_nanos(span.start_time),
        "duration_us": duration_us,
        "attributes": attributes(&span.attributes),
        "events": events,
        "status": status(&span.status),
    })
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        other => JsonValue::String(other.as_str().into_owned()),
    }
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

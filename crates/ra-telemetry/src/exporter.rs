//! Span export: structured logging plus forwarding to a trace sink.
//!
//! The sinks are injected capabilities rather than ambient globals so the
//! exporter (and everything behind it) is testable without any backend.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::span::SpanRecord;
use crate::truncate::{truncate_attributes, TruncationLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Destination for structured log entries.
pub trait LogSink: Send + Sync {
    fn log_struct(&self, entry: Value, labels: &[(&str, &str)], severity: Severity);
}

/// Downstream consumer of finished spans (a tracing backend, in production).
pub trait TraceSink: Send + Sync {
    fn forward(&self, spans: &[SpanRecord]) -> ExportOutcome;
}

/// Default log sink: emits entries through `tracing` as JSON text.
#[derive(Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log_struct(&self, entry: Value, labels: &[(&str, &str)], severity: Severity) {
        match severity {
            Severity::Info => {
                tracing::info!(target: "ra_telemetry::log", labels = ?labels, entry = %entry)
            }
            Severity::Warning => {
                tracing::warn!(target: "ra_telemetry::log", labels = ?labels, entry = %entry)
            }
            Severity::Error => {
                tracing::error!(target: "ra_telemetry::log", labels = ?labels, entry = %entry)
            }
        }
    }
}

/// Trace sink for deployments with no tracing backend attached.
#[derive(Debug, Default)]
pub struct NoopTraceSink;

impl TraceSink for NoopTraceSink {
    fn forward(&self, _spans: &[SpanRecord]) -> ExportOutcome {
        ExportOutcome::Success
    }
}

/// Exports spans by logging each one as a structured entry (with truncated
/// attributes) and then handing the batch to the trace sink.
pub struct LoggingSpanExporter {
    log_sink: Arc<dyn LogSink>,
    trace_sink: Arc<dyn TraceSink>,
    service_name: String,
    limits: TruncationLimits,
    debug: bool,
}

impl LoggingSpanExporter {
    pub fn new(
        log_sink: Arc<dyn LogSink>,
        trace_sink: Arc<dyn TraceSink>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            log_sink,
            trace_sink,
            service_name: service_name.into(),
            limits: TruncationLimits::default(),
            debug: false,
        }
    }

    pub fn with_limits(mut self, limits: TruncationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn export(&self, spans: &[SpanRecord]) -> ExportOutcome {
        for span in spans {
            let mut entry = match serde_json::to_value(span) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    tracing::warn!(span = %span.name, "span did not serialize to an object; skipping");
                    continue;
                }
            };

            entry.insert(
                "trace".to_string(),
                Value::String(format!("{}/traces/{}", self.service_name, span.trace_id)),
            );
            entry.insert("span_id".to_string(), Value::String(span.span_id.clone()));

            if let Some(Value::Object(attributes)) = entry.get("attributes") {
                let processed = truncate_attributes(attributes, self.limits);
                entry.insert("attributes".to_string(), Value::Object(processed));
            }

            if self.debug {
                tracing::debug!(entry = %serde_json::Value::Object(entry.clone()), "exporting span");
            }

            self.log_sink.log_struct(
                Value::Object(entry),
                &[
                    ("type", "agent_telemetry"),
                    ("service_name", &self.service_name),
                ],
                Severity::Info,
            );
        }

        self.trace_sink.forward(spans)
    }

    /// Truncate a free-standing attributes mapping with this exporter's limits.
    pub fn process_attributes(&self, attributes: &Map<String, Value>) -> Map<String, Value> {
        truncate_attributes(attributes, self.limits)
    }
}

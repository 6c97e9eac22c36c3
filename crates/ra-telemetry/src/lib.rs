//! ra-telemetry: span records, attribute truncation, and export.
//!
//! Spans produced per unit of observed work are serialized to structured log
//! entries and forwarded to a trace sink. Oversized attribute values are
//! truncated first so the logging backend's entry-size limit is never hit.

pub mod exporter;
pub mod span;
pub mod truncate;

pub use exporter::{
    ExportOutcome, LogSink, LoggingSpanExporter, NoopTraceSink, Severity, TraceSink,
    TracingLogSink,
};
pub use span::{SpanRecord, SpanStatus};
pub use truncate::{truncate_attributes, TruncationLimits, TRUNCATION_SUFFIX};

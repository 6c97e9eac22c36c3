//! Span records describing one traced operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStatus {
    Unset,
    Ok,
    Error,
}

/// A single telemetry record for one traced operation: trace/span ids, wall
/// clock bounds, and a free-form attributes mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanRecord {
    pub name: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attributes: Map<String, Value>,
    pub status: SpanStatus,
}

impl SpanRecord {
    /// Start a new root span with generated trace and span ids.
    pub fn start(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: short_id(),
            parent_span_id: None,
            start_time: now,
            end_time: now,
            attributes: Map::new(),
            status: SpanStatus::Unset,
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    pub fn set_status(&mut self, status: SpanStatus) {
        self.status = status;
    }

    /// Close the span, stamping the end time.
    pub fn finish(&mut self) {
        self.end_time = Utc::now();
    }
}

/// 16-hex-char span id, cut from a v4 uuid.
fn short_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_span_ids_are_hex_and_distinct() {
        let a = SpanRecord::start("tool/research_topic");
        let b = SpanRecord::start("tool/research_topic");
        assert_eq!(a.trace_id.len(), 32);
        assert_eq!(a.span_id.len(), 16);
        assert!(a.trace_id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.trace_id, b.trace_id);
        assert_ne!(a.span_id, b.span_id);
    }

    #[test]
    fn test_span_serializes_attributes_and_status() {
        let mut span = SpanRecord::start("tool/analyze_trends");
        span.set_attribute("tool.name", json!("analyze_trends"));
        span.set_status(SpanStatus::Ok);
        span.finish();

        let value = serde_json::to_value(&span).unwrap();
        assert_eq!(value["name"], "tool/analyze_trends");
        assert_eq!(value["status"], "ok");
        assert_eq!(value["attributes"]["tool.name"], "analyze_trends");
        assert!(value.get("parent_span_id").is_none());
    }
}

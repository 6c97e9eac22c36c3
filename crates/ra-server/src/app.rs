//! HTTP surface: tool listing and dispatch, feedback collection, health.
//!
//! `/run` is the boundary an external agent runtime calls through; each
//! invocation is recorded as a span and pushed through the truncating
//! exporter before the response is returned.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use ra_core::{ToolDefinition, ToolRegistry};
use ra_telemetry::{
    ExportOutcome, LogSink, LoggingSpanExporter, NoopTraceSink, Severity, SpanRecord, SpanStatus,
    TracingLogSink,
};
use ra_tools::create_knowledge_tools;

use crate::config::Config;

pub struct AppState {
    pub registry: ToolRegistry,
    pub exporter: LoggingSpanExporter,
    pub log_sink: Arc<dyn LogSink>,
    pub service_name: String,
}

/// Wire up the tool registry, sinks, and exporter from configuration.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let mut registry = ToolRegistry::new();
    for tool in create_knowledge_tools() {
        registry.register(tool);
    }

    let log_sink: Arc<dyn LogSink> = Arc::new(TracingLogSink);
    let exporter = LoggingSpanExporter::new(
        log_sink.clone(),
        Arc::new(NoopTraceSink),
        config.telemetry.service_name.clone(),
    )
    .with_limits(config.telemetry.limits())
    .with_debug(config.telemetry.debug);

    Arc::new(AppState {
        registry,
        exporter,
        log_sink,
        service_name: config.telemetry.service_name.clone(),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/tools", get(list_tools))
        .route("/run", post(run_tool))
        .route("/feedback", post(collect_feedback))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolDefinition>> {
    Json(state.registry.definitions())
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub tool: String,
    #[serde(default)]
    pub args: Value,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub invocation_id: String,
    pub tool: String,
    pub output: Value,
}

async fn run_tool(State(state): State<Arc<AppState>>, Json(req): Json<RunRequest>) -> Response {
    let Some(tool) = state.registry.get(&req.tool) else {
        let mut names = state.registry.names().join(", ");
        if names.is_empty() {
            names = "none".to_string();
        }
        let body = json!({
            "status": "error",
            "error_message": format!("Unknown tool '{}'. Available tools: {}", req.tool, names),
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };

    let invocation_id = Uuid::new_v4().to_string();
    let args = match req.args {
        Value::Null => json!({}),
        other => other,
    };

    let mut span = SpanRecord::start(format!("tool/{}", req.tool));
    span.set_attribute("tool.name", json!(req.tool));
    span.set_attribute("tool.args", json!(args.to_string()));
    span.set_attribute("invocation.id", json!(invocation_id));
    if let Some(session_id) = &req.session_id {
        span.set_attribute("session.id", json!(session_id));
    }

    let response = match tool.execute(args).await {
        Ok(output) => {
            // Tool-level failures (unknown topic, unknown domain) are
            // ordinary results carrying a failure tag, not HTTP errors.
            span.set_attribute("tool.output", json!(output.content.to_string()));
            span.set_status(if output.is_error {
                SpanStatus::Error
            } else {
                SpanStatus::Ok
            });
            Json(RunResponse {
                invocation_id,
                tool: req.tool.clone(),
                output: output.content,
            })
            .into_response()
        }
        Err(err) => {
            span.set_attribute("tool.error", json!(err.to_string()));
            span.set_status(SpanStatus::Error);
            let body = json!({"status": "error", "error_message": err.to_string()});
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    };

    span.finish();
    if state.exporter.export(std::slice::from_ref(&span)) == ExportOutcome::Failure {
        tracing::warn!(tool = %req.tool, "span export failed");
    }

    response
}

/// Feedback for one invocation, forwarded verbatim to the log sink.
#[derive(Debug, Serialize, Deserialize)]
pub struct Feedback {
    pub score: f64,
    #[serde(default)]
    pub text: Option<String>,
    pub invocation_id: String,
    #[serde(default = "default_log_type")]
    pub log_type: String,
    #[serde(default = "default_feedback_service")]
    pub service_name: String,
    #[serde(default)]
    pub user_id: String,
}

fn default_log_type() -> String {
    "feedback".to_string()
}

fn default_feedback_service() -> String {
    "researcher-agent".to_string()
}

async fn collect_feedback(
    State(state): State<Arc<AppState>>,
    Json(feedback): Json<Feedback>,
) -> Json<Value> {
    match serde_json::to_value(&feedback) {
        Ok(entry) => state.log_sink.log_struct(entry, &[], Severity::Info),
        Err(err) => tracing::warn!(%err, "feedback entry did not serialize"),
    }
    Json(json!({"status": "success"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(build_state(&Config::default()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, body) = get_json(test_app(), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_tools_lists_both_knowledge_tools() {
        let (status, body) = get_json(test_app(), "/tools").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["analyze_trends", "research_topic"]);
    }

    #[tokio::test]
    async fn test_run_research_topic_success() {
        let (status, body) = post_json(
            test_app(),
            "/run",
            json!({
                "tool": "research_topic",
                "args": {"topic": "artificial intelligence", "focus_area": "business"},
                "session_id": "session_1",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tool"], "research_topic");
        assert!(!body["invocation_id"].as_str().unwrap().is_empty());
        assert_eq!(body["output"]["status"], "success");
        assert!(body["output"]["research"]["insights"]
            .as_str()
            .unwrap()
            .starts_with("AI is transforming industries"));
    }

    #[tokio::test]
    async fn test_run_unknown_tool_is_404() {
        let (status, body) =
            post_json(test_app(), "/run", json!({"tool": "send_email"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert!(body["error_message"]
            .as_str()
            .unwrap()
            .contains("send_email"));
    }

    #[tokio::test]
    async fn test_run_invalid_args_is_400() {
        let (status, body) = post_json(
            test_app(),
            "/run",
            json!({"tool": "research_topic", "args": {"focus_area": "business"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_run_tool_level_failure_is_200_with_error_tag() {
        let (status, body) = post_json(
            test_app(),
            "/run",
            json!({"tool": "analyze_trends", "args": {"domain": "unknown_domain"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"]["status"], "error");
        assert_eq!(
            body["output"]["error_message"],
            "Sorry, trend analysis not available for 'unknown_domain'. \
             Available domains: technology, business, science."
        );
    }

    #[tokio::test]
    async fn test_feedback_roundtrip() {
        let (status, body) = post_json(
            test_app(),
            "/feedback",
            json!({"score": 4.5, "text": "useful", "invocation_id": "abc-123"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success"}));
    }

    #[tokio::test]
    async fn test_feedback_requires_invocation_id() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/feedback")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"score": 2.0}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

//! Thin traffic generator against the researcher-agent HTTP endpoints.
//!
//! Each virtual user posts tool invocations to `/run` (and occasionally
//! feedback to `/feedback`) using a weighted task rotation that mirrors the
//! intended traffic mix: artificial-intelligence research dominates, trend
//! analysis and feedback trail behind.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tokio::task::JoinSet;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ra-loadgen")]
#[command(author, version, about = "Generate traffic against a researcher-agent server", long_about = None)]
struct Cli {
    /// Base URL of the server under test
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Number of concurrent virtual users
    #[arg(short, long, default_value_t = 4)]
    users: usize,

    /// Requests per virtual user
    #[arg(short = 'n', long, default_value_t = 25)]
    requests: usize,

    /// Minimum wait between requests (seconds)
    #[arg(long, default_value_t = 1.0)]
    min_wait: f64,

    /// Maximum wait between requests (seconds)
    #[arg(long, default_value_t = 3.0)]
    max_wait: f64,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Research(&'static str),
    Trends(&'static str),
    Feedback,
}

const FOCUS_AREAS: [&str; 4] = ["general", "technical", "business", "social"];

/// Weighted task list: research AI x3, climate x2, blockchain x2,
/// technology trends x2, business trends x1, feedback x1.
fn traffic_mix() -> Vec<Step> {
    vec![
        Step::Research("artificial intelligence"),
        Step::Research("climate change"),
        Step::Research("artificial intelligence"),
        Step::Trends("technology"),
        Step::Research("blockchain"),
        Step::Trends("business"),
        Step::Research("artificial intelligence"),
        Step::Trends("technology"),
        Step::Research("climate change"),
        Step::Feedback,
        Step::Research("blockchain"),
    ]
}

#[derive(Debug, Default)]
struct UserStats {
    ok: usize,
    failed: usize,
    total_latency: Duration,
}

async fn run_user(
    client: reqwest::Client,
    base_url: String,
    user_index: usize,
    requests: usize,
    min_wait: f64,
    max_wait: f64,
) -> UserStats {
    let session_id = format!("session_{}", Uuid::new_v4());
    let mix = traffic_mix();
    let mut stats = UserStats::default();
    let mut last_invocation_id: Option<String> = None;

    for i in 0..requests {
        let step = mix[(user_index + i) % mix.len()];
        let focus = FOCUS_AREAS[(user_index + i) % FOCUS_AREAS.len()];

        let (path, body) = match step {
            Step::Research(topic) => (
                "/run",
                json!({
                    "tool": "research_topic",
                    "args": {"topic": topic, "focus_area": focus},
                    "session_id": session_id,
                }),
            ),
            Step::Trends(domain) => (
                "/run",
                json!({
                    "tool": "analyze_trends",
                    "args": {"domain": domain},
                    "session_id": session_id,
                }),
            ),
            Step::Feedback => (
                "/feedback",
                json!({
                    "score": 4,
                    "text": "helpful summary",
                    "invocation_id": last_invocation_id
                        .clone()
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    "user_id": format!("user_{user_index}"),
                }),
            ),
        };

        let started = Instant::now();
        match client
            .post(format!("{base_url}{path}"))
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                stats.ok += 1;
                stats.total_latency += started.elapsed();
                if path == "/run" {
                    if let Ok(value) = response.json::<Value>().await {
                        if let Some(id) = value["invocation_id"].as_str() {
                            last_invocation_id = Some(id.to_string());
                        }
                    }
                }
            }
            Ok(response) => {
                stats.failed += 1;
                tracing::warn!(status = %response.status(), path, "request failed");
            }
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(%err, path, "request error");
            }
        }

        // Deterministic jitter across the configured wait range.
        let frac = ((user_index * 7 + i * 3) % 10) as f64 / 9.0;
        let wait = min_wait + (max_wait - min_wait) * frac;
        tokio::time::sleep(Duration::from_secs_f64(wait)).await;
    }

    stats
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .init();

    let cli = Cli::parse();
    if cli.max_wait < cli.min_wait {
        anyhow::bail!("--max-wait must be >= --min-wait");
    }

    let client = reqwest::Client::builder()
        .user_agent("ra-loadgen/0.1.0")
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")?;

    println!(
        "ra-loadgen: {} users x {} requests against {}",
        cli.users, cli.requests, cli.base_url
    );

    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for user_index in 0..cli.users {
        tasks.spawn(run_user(
            client.clone(),
            cli.base_url.clone(),
            user_index,
            cli.requests,
            cli.min_wait,
            cli.max_wait,
        ));
    }

    let mut totals = UserStats::default();
    while let Some(joined) = tasks.join_next().await {
        let stats = joined.context("virtual user task panicked")?;
        totals.ok += stats.ok;
        totals.failed += stats.failed;
        totals.total_latency += stats.total_latency;
    }

    let elapsed = started.elapsed();
    println!(
        "done in {:.1}s: {} ok, {} failed",
        elapsed.as_secs_f64(),
        totals.ok,
        totals.failed
    );
    if totals.ok > 0 {
        println!(
            "mean latency: {:.1} ms",
            totals.total_latency.as_secs_f64() * 1000.0 / totals.ok as f64
        );
    }

    Ok(())
}

//! Prometheus metrics for request traffic and quiz activity.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use qzr_progress::Difficulty;
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});
static NUMBER_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("number pattern is valid"));

/// Install the Prometheus recorder
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        // Generation calls go out to a remote model and take seconds
        .set_buckets_for_metric(
            Matcher::Full("generation_duration_seconds".to_string()),
            &[0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware recording count and latency of every request
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Replace ids in a path with `:id` to keep label cardinality low
fn normalize_path(path: &str) -> String {
    let normalized = UUID_SEGMENT.replace_all(path, ":id");
    NUMBER_SEGMENT.replace_all(&normalized, "/:id").to_string()
}

/// Handler for `/metrics`
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Count a finished quiz and the badges it unlocked
pub fn record_quiz_completed(difficulty: Difficulty, badges_unlocked: usize) {
    counter!("quizzes_completed_total", "difficulty" => difficulty.as_str()).increment(1);
    if badges_unlocked > 0 {
        counter!("badges_unlocked_total").increment(badges_unlocked as u64);
    }
}

/// Record one call to the content generator
pub fn record_generation(kind: &'static str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "failure" };

    counter!("generation_requests_total", "kind" => kind, "status" => status).increment(1);
    histogram!("generation_duration_seconds", "kind" => kind).record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/quizzes/550e8400-e29b-41d4-a716-446655440000/complete"),
            "/quizzes/:id/complete"
        );
        assert_eq!(normalize_path("/quizzes/1718000000000"), "/quizzes/:id");
        assert_eq!(normalize_path("/results/summary"), "/results/summary");
        assert_eq!(normalize_path("/health"), "/health");
    }
}

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::error;

use shule_models::EducationLevel;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// `OBSERVABILITY_ENABLED` unset, or anything but `false`/`0`, means enabled.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `None` when observability is disabled or the recorder cannot be
/// installed; the server keeps running without metrics in both cases.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "failed to install Prometheus recorder");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

pub fn track_application_submitted(level: EducationLevel) {
    if !is_observability_enabled() {
        return;
    }
    counter!("applications_submitted_total", "level" => level.as_str()).increment(1);
}

pub fn track_payment_completed(level: EducationLevel) {
    if !is_observability_enabled() {
        return;
    }
    counter!("applications_payment_completed_total", "level" => level.as_str()).increment(1);
}

pub fn track_application_decided(level: EducationLevel, decision: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("applications_decided_total", "level" => level.as_str(), "decision" => decision)
        .increment(1);
}

/// `attempts` above one means the unique index caught a collision.
pub fn track_registration_allocated(level: EducationLevel, attempts: u32) {
    if !is_observability_enabled() {
        return;
    }
    counter!("registration_numbers_allocated_total", "level" => level.as_str()).increment(1);
    if attempts > 1 {
        counter!("registration_number_retries_total", "level" => level.as_str())
            .increment(u64::from(attempts - 1));
    }
}

/// `kind` is a role name, or `staff` when the role is not known yet.
pub fn track_login(kind: &'static str, success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let outcome = if success { "success" } else { "failure" };
    counter!("logins_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn track_rate_limited(scope: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("rate_limited_requests_total", "scope" => scope).increment(1);
}

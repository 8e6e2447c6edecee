// prometheus exporter setup

use std::time::Instant;

use axum::{
    body::Body, extract::MatchedPath, http::Request, middleware::Next, response::IntoResponse,
};
use metrics::counter;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::classify::DataType;

const METRIC_HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
const METRIC_HTTP_REQUESTS_DURATION_SECONDS: &str = "http_requests_duration_seconds";
const METRIC_CLASSIFICATIONS_TOTAL: &str = "type_api_classifications_total";
const METRIC_VALIDATION_ERRORS_TOTAL: &str = "type_api_validation_errors_total";

pub fn report_classification(data_type: DataType) {
    counter!(METRIC_CLASSIFICATIONS_TOTAL, "data_type" => data_type.as_str()).increment(1);
}

pub fn report_validation_error(cause: &'static str) {
    counter!(METRIC_VALIDATION_ERRORS_TOTAL, "cause" => cause).increment(1);
}

pub fn setup_metrics_recorder() -> PrometheusHandle {
    const EXPONENTIAL_SECONDS: &[f64] = &[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(METRIC_HTTP_REQUESTS_DURATION_SECONDS.to_string()),
            EXPONENTIAL_SECONDS,
        )
        .expect("failed to set histogram buckets")
        .install_recorder()
        .expect("failed to install prometheus recorder")
}

/// Middleware to record some common HTTP metrics
/// Someday tower-http might provide a metrics middleware: https://github.com/tower-rs/tower-http/issues/57
pub async fn track_metrics(req: Request<Body>, next: Next) -> impl IntoResponse {
    let start = Instant::now();

    let path = if let Some(matched_path) = req.extensions().get::<MatchedPath>() {
        matched_path.as_str().to_owned()
    } else {
        req.uri().path().to_owned()
    };

    let method = req.method().clone();

    // Run the rest of the request handling first, so we can measure it and get response
    // codes.
    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let labels = [
        ("method", method.to_string()),
        ("path", path),
        ("status", status),
    ];

    counter!(METRIC_HTTP_REQUESTS_TOTAL, &labels).increment(1);
    metrics::histogram!(METRIC_HTTP_REQUESTS_DURATION_SECONDS, &labels).record(latency);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_counters_are_rendered() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            report_classification(DataType::Int);
            report_classification(DataType::Float64);
            report_classification(DataType::Int);
            report_validation_error("missing_key");
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"type_api_classifications_total{data_type="int"} 2"#));
        assert!(rendered.contains(r#"type_api_classifications_total{data_type="float64"} 1"#));
        assert!(rendered.contains(r#"type_api_validation_errors_total{cause="missing_key"} 1"#));
    }
}

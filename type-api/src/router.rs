use std::future::ready;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::prometheus::{setup_metrics_recorder, track_metrics};
use crate::v0_endpoint;

pub fn router(metrics: bool, max_body_size: usize) -> Router {
    let status_router = Router::new()
        .route("/_readiness", get(|| ready(StatusCode::OK)))
        .route("/_liveness", get(|| ready(StatusCode::OK)));

    // Any method is accepted on the classification endpoint.
    let classify_router = Router::new()
        .route("/", any(v0_endpoint::event))
        .layer(DefaultBodyLimit::max(max_body_size));

    let router = Router::new()
        .merge(status_router)
        .merge(classify_router)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(track_metrics));

    // Don't install metrics unless asked to
    // Installing a global recorder when type-api is used as a library (during tests etc)
    // does not work well.
    if metrics {
        let recorder_handle = setup_metrics_recorder();
        router.route("/metrics", get(move || ready(recorder_handle.render())))
    } else {
        router
    }
}

use std::{net::SocketAddr, sync::Arc};

use crate::{config::Config, main_lib::AppState};
use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    routing::get,
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

mod pages;
mod recipients;

pub async fn healthz() -> &'static str {
    "ok"
}

// One span per request. The request id is set by the layer that runs before
// this one, so it is already on the request.
fn request_span(request: &Request) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-");
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    tracing::info_span!(
        "request",
        request_id = %request_id,
        remote = %remote,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(recipients::router());

    Router::new()
        .merge(pages::router())
        .nest("/api/v1", api)
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

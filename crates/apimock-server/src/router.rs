use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request};
use axum::{middleware, Router};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{Level, Span};

use apimock_store::ResourceStore;

use crate::cors::cors;
use crate::handler::{self, AppState};

/// Header set by reverse proxies to carry the original client address.
const REAL_IP_HEADER: &str = "x-real-ip";

/// Build the axum router. Every method and path goes to the dispatcher.
pub fn build_router(store: Arc<dyn ResourceStore>, max_body_size: usize) -> Router {
    let state = AppState { store, max_body_size };
    Router::new()
        .fallback(handler::dispatch)
        .layer(middleware::from_fn(cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(state)
}

fn request_span(req: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        client = %client_address(req)
    )
}

/// `X-Real-IP` if present, otherwise the peer address of the connection.
fn client_address(req: &Request) -> String {
    req.headers()
        .get(REAL_IP_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
        })
        .unwrap_or_else(|| "-".to_string())
}

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, DefaultBodyLimit},
    handler::HandlerWithoutStateExt,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        checkin::{create_check_in, list_check_ins},
        fallback::not_found,
        health::livez,
    },
    rate_limit::rate_limit,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Ingest route: rate limited, body capped just above the photo limit
    let ingest_routes = Router::new()
        .route("/ponto", post(create_check_in))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes()));

    let uploads = ServeDir::new(state.photos.upload_dir()).not_found_service(not_found.into_service());

    Router::new()
        .merge(ingest_routes)
        .route("/pontos", get(list_check_ins))
        .route("/livez", get(livez))
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let client = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
                .unwrap_or_else(|| "unknown".to_string());

            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                client = %client,
            )
        }))
        .with_state(state)
}

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::post,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new().route("/translate", post(handlers::translate))
}

/// Any origin; the usual REST verbs; `Content-Type` and `Authorization` headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Full application router with request tracing and optional CORS
pub fn build_router(state: AppState) -> Router {
    let mut router = create_routes().layer(TraceLayer::new_for_http());

    if state.config.system_config.enable_cors {
        router = router.layer(cors_layer());
    }

    router.with_state(state)
}

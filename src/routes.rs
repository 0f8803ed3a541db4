// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers::results, state::AppState};

/// Assembles the application router.
///
/// * One resource: `/api/results` (GET, POST, OPTIONS; anything else 405).
/// * Applies global middleware (Trace, permissive CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    // The front-end is served from a different origin, so CORS stays wide
    // open: any origin, the three supported methods, Content-Type only.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/results",
            get(results::fetch_results)
                .post(results::submit_result)
                .options(results::preflight)
                .fallback(results::method_not_allowed),
        )
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

use crate::handlers::{self, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Path the site's contact form posts to.
pub const LEAD_ROUTE: &str = "/.netlify/functions/hubspot-lead";

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Builds the router with tracing.
///
/// CORS is only enabled on `/health`; the lead route is same-origin and every
/// non-POST request to it, preflights included, must reach the forwarder.
/// Rate limiting is added in `main`, since it depends on the peer address of
/// a real listener.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/health",
            get(handlers::health).layer(CorsLayer::permissive()),
        )
        .route(LEAD_ROUTE, any(handlers::submit_lead))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

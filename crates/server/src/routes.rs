//! Route configuration.

use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let import_limit = state.config.server.max_import_bytes;

    let api_routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route(
            "/api/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/contacts/{contact_id}",
            get(handlers::get_contact).delete(handlers::delete_contact),
        )
        .route(
            "/api/contacts/{contact_id}/favorite",
            put(handlers::set_favorite),
        )
        .route("/api/export", get(handlers::export_contacts))
        .route(
            "/api/import",
            post(handlers::import_contacts).layer(DefaultBodyLimit::max(import_limit)),
        );

    let mut router = Router::new().merge(api_routes);

    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    // Anything not matched above is served from the UI directory.
    if let Some(static_dir) = &state.config.server.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

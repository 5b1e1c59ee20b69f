/**
 * Router Configuration
 *
 * Builds the complete application router:
 *
 * 1. **Health**: `GET /`
 * 2. **API Routes**: public, then protected behind `auth_middleware`
 * 3. **Static Files**: uploaded images under `/uploads`
 * 4. **Fallback Handler**: JSON 404
 *
 * Layers, outermost first: request tracing, CORS, body size limit.
 */

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::state::AppState;
use crate::backend::uploads::MAX_UPLOAD_BYTES;

/// Multipart framing on top of the largest accepted image
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_protected_routes(Router::new()).route_layer(middleware::from_fn_with_state(
        app_state.clone(),
        auth_middleware,
    ));

    let router = Router::new()
        .route("/", get(|| async { "API is running" }))
        .merge(configure_public_routes(Router::new()))
        .merge(protected);

    let router = router.nest_service("/uploads", ServeDir::new(&app_state.config.uploads_dir));

    let router = router.fallback(route_not_found);

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(&app_state.config.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn route_not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Route not found")
}

/// Browser access from the configured front-end origin, with credentials
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN '{}': {}", origin, e);
            layer
        }
    }
}

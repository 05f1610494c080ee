//! Application route configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{admin_routes, article_routes, health, session_routes, webhook};
use super::middleware::require_admin_session;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let paths = state.admin.paths.clone();

    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .merge(article_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Login and logout live next to the admin under the same prefix
        .merge(session_routes(&paths))
        .merge(admin_routes(&paths).route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_session,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

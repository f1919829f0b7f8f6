use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use rsvp_config::CorsConfig;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the full application.
///
/// `/api/auth/*` is public. Everything else under `/api` passes through
/// [`authenticate`] first, then any per-route role guard.
pub fn init_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/users", init_users_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .merge(protected),
        )
        .with_state(state.clone())
        .layer(TimeoutLayer::new(state.server_config.request_timeout))
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}

pub mod docs;
pub mod routes;

use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::public;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;
use routes::Access;

/// Assemble the full application router around `state`.
pub fn app(state: AppState) -> Router {
    let endpoints = routes::endpoints();
    let index = Arc::new(docs::service_index(&endpoints));
    let openapi = Arc::new(docs::openapi(&endpoints));

    let mut public_routes = Router::new()
        .route("/", get(move || public::document(index.clone())))
        .route("/docs", get(move || public::document(openapi.clone())));
    let mut protected_routes = Router::new();

    for endpoint in endpoints {
        match endpoint.access {
            Access::Public => public_routes = public_routes.route(endpoint.path, endpoint.handler),
            Access::Token => protected_routes = protected_routes.route(endpoint.path, endpoint.handler),
        }
    }

    // route_layer keeps the gate off unmatched paths, which fall through to the 404 fallback
    let protected_routes =
        protected_routes.route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let cors = cors_layer(&state.config.security);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(public::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

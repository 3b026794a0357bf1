pub mod campus;
pub mod client;
pub mod config;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod routing;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::campus::CampusData;

#[derive(Clone)]
pub struct AppState {
    pub campus: Arc<CampusData>,
}

impl AppState {
    pub fn new(campus: CampusData) -> Self {
        Self {
            campus: Arc::new(campus),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/locations",
            get(handlers::list_locations).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/locations/search",
            get(handlers::search_locations).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/locations/:id",
            get(handlers::get_location).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/route",
            post(handlers::route).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/route/locations",
            post(handlers::route_between_locations).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/nearby",
            post(handlers::nearby).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/navigate",
            post(handlers::navigate).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::Catalog;

pub struct AppState {
    pub catalog: Catalog,
}

/// The production router; integration tests build the same one.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(routes::list_movies).post(routes::register_movie))
        .route("/movies/{id}", put(routes::update_movie).delete(routes::remove_movie))
        .route("/movies/genre/{name}", get(routes::movies_by_genre))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

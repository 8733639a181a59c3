use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    catalog::CatalogError,
    error::{AppError, AppResult},
    models::{MovieRecord, RegisterMovie, UpdateMovie},
};

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieRecord>>> {
    match state.catalog.list().await {
        Ok(movies) => Ok(Json(movies)),
        Err(err) => Err(storage_failure(err, "Failed to list movies")),
    }
}

pub async fn register_movie(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterMovie>,
) -> AppResult<StatusCode> {
    match state.catalog.register(input).await {
        Ok(()) => Ok(StatusCode::CREATED),
        Err(CatalogError::DuplicateTitle) => {
            Err(AppError::conflict("This movie title has been registered already"))
        }
        Err(err) => Err(storage_failure(err, "Failed to register the movie")),
    }
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<StatusCode> {
    match state.catalog.update(coerce_id(&id), input).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(CatalogError::MovieNotFound) => Err(AppError::not_found("Movie not found")),
        Err(err) => Err(storage_failure(err, "Failed to update the movie")),
    }
}

pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    match state.catalog.remove(coerce_id(&id)).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(CatalogError::MovieNotFound) => Err(AppError::not_found("Movie not found")),
        Err(err) => Err(storage_failure(err, "Failed to remove the movie")),
    }
}

pub async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    match state.catalog.by_genre(&name).await {
        Ok(movies) => Ok(Json(movies)),
        Err(err) => Err(storage_failure(err, "Failed to filter movies")),
    }
}

/// Path ids are coerced, not validated: garbage parses to an id that fails
/// the existence check and surfaces as 404 rather than a routing error.
fn coerce_id(raw: &str) -> i32 {
    raw.parse().unwrap_or(-1)
}

fn storage_failure(err: CatalogError, message: &str) -> AppError {
    tracing::error!(error = %err, "storage operation failed");
    AppError::internal(message)
}

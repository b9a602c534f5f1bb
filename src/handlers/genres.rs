use crate::error::AppError;
use crate::response::{created, success_many, success_one};
use crate::service::genres::{GenreService, GenreUpdate, NewGenre};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = GenreService::list(
        &state.pool,
        params.name.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewGenre>,
) -> Result<impl IntoResponse, AppError> {
    let row = GenreService::create(&state.pool, &payload).await?;
    Ok(created(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = GenreService::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GenreUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let row = GenreService::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !GenreService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(id.to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

use crate::error::AppError;
use crate::response::{created, success_many, success_one};
use crate::service::books::{BookService, BookUpdate, NewBook};
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
    pub author_id: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows =
        BookService::list(&state.pool, params.author_id, params.limit, params.offset).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewBook>,
) -> Result<impl IntoResponse, AppError> {
    let row = BookService::create(&state.pool, &payload).await?;
    Ok(created(row))
}

/// Detail carries the full genre rows alongside the book columns.
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = BookService::detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(detail))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let row = BookService::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !BookService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(id.to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

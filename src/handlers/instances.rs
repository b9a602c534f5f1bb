use crate::error::AppError;
use crate::models::LoanStatus;
use crate::response::{created, success_many, success_one};
use crate::service::instances::{InstanceFilter, InstanceService, InstanceUpdate, NewInstance};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// One-character status code (m/o/a/r).
    pub status: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub book_id: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let status = match params.status.as_deref() {
        Some(code) => Some(
            LoanStatus::from_code(code)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status code '{}'", code)))?,
        ),
        None => None,
    };
    let filter = InstanceFilter {
        status,
        due_back: params.due_back,
        book_id: params.book_id,
    };
    let rows = InstanceService::list(&state.pool, filter, params.limit, params.offset).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewInstance>,
) -> Result<impl IntoResponse, AppError> {
    let row = InstanceService::create(&state.pool, &payload).await?;
    Ok(created(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = InstanceService::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InstanceUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let row = InstanceService::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(success_one(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !InstanceService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(id.to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

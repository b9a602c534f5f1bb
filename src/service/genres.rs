use super::page;
use crate::error::AppError;
use crate::models::Genre;
use crate::validation::{require_text, NAME_MAX};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreUpdate {
    pub name: Option<String>,
}

pub struct GenreService;

impl GenreService {
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Genre>, AppError> {
        let (limit, offset) = page(limit, offset);
        let rows = match name {
            Some(name) => {
                sqlx::query_as::<_, Genre>(
                    "SELECT id, name FROM genre WHERE name = $1 ORDER BY id LIMIT $2 OFFSET $3",
                )
                .bind(name)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Genre>("SELECT id, name FROM genre ORDER BY id LIMIT $1 OFFSET $2")
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Genre>, AppError> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genre WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, payload: &NewGenre) -> Result<Genre, AppError> {
        require_text("name", &payload.name, NAME_MAX)?;
        tracing::debug!(name = %payload.name, "create genre");
        let row = sqlx::query_as::<_, Genre>("INSERT INTO genre (name) VALUES ($1) RETURNING id, name")
            .bind(&payload.name)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        payload: &GenreUpdate,
    ) -> Result<Option<Genre>, AppError> {
        let Some(name) = &payload.name else {
            return Self::get(pool, id).await;
        };
        require_text("name", name, NAME_MAX)?;
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genre SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM genre WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

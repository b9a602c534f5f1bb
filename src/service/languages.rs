use super::page;
use crate::error::AppError;
use crate::models::Language;
use crate::validation::{require_text, NAME_MAX};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct NewLanguage {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageUpdate {
    pub name: Option<String>,
}

pub struct LanguageService;

impl LanguageService {
    pub async fn list(
        pool: &PgPool,
        name: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Language>, AppError> {
        let (limit, offset) = page(limit, offset);
        let rows = match name {
            Some(name) => {
                sqlx::query_as::<_, Language>(
                    "SELECT id, name FROM language WHERE name = $1 ORDER BY id LIMIT $2 OFFSET $3",
                )
                .bind(name)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Language>(
                    "SELECT id, name FROM language ORDER BY id LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Language>, AppError> {
        let row = sqlx::query_as::<_, Language>("SELECT id, name FROM language WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, payload: &NewLanguage) -> Result<Language, AppError> {
        require_text("name", &payload.name, NAME_MAX)?;
        tracing::debug!(name = %payload.name, "create language");
        let row = sqlx::query_as::<_, Language>(
            "INSERT INTO language (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&payload.name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        payload: &LanguageUpdate,
    ) -> Result<Option<Language>, AppError> {
        let Some(name) = &payload.name else {
            return Self::get(pool, id).await;
        };
        require_text("name", name, NAME_MAX)?;
        let row = sqlx::query_as::<_, Language>(
            "UPDATE language SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM language WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

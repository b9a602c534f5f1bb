use super::{double_option, page};
use crate::error::AppError;
use crate::models::Author;
use crate::validation::{require_text, PERSON_NAME_MAX};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, date_of_birth, date_of_death";

#[derive(Debug, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_death: Option<Option<NaiveDate>>,
}

impl AuthorUpdate {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.date_of_death.is_none()
    }
}

pub struct AuthorService;

impl AuthorService {
    /// List authors in natural order (last_name, first_name), with an
    /// optional exact-match last_name filter.
    pub async fn list(
        pool: &PgPool,
        last_name: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Author>, AppError> {
        let (limit, offset) = page(limit, offset);
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM author", AUTHOR_COLUMNS));
        if let Some(last_name) = last_name {
            qb.push(" WHERE last_name = ").push_bind(last_name);
        }
        qb.push(" ORDER BY last_name, first_name LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build_query_as::<Author>().fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM author WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn create(pool: &PgPool, payload: &NewAuthor) -> Result<Author, AppError> {
        require_text("first_name", &payload.first_name, PERSON_NAME_MAX)?;
        require_text("last_name", &payload.last_name, PERSON_NAME_MAX)?;
        tracing::debug!(last_name = %payload.last_name, "create author");
        let row = sqlx::query_as::<_, Author>(&format!(
            "INSERT INTO author (first_name, last_name, date_of_birth, date_of_death)
             VALUES ($1, $2, $3, $4) RETURNING {}",
            AUTHOR_COLUMNS
        ))
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(payload.date_of_birth)
        .bind(payload.date_of_death)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Partial update: only fields present in the payload are written.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        payload: &AuthorUpdate,
    ) -> Result<Option<Author>, AppError> {
        if payload.is_empty() {
            return Self::get(pool, id).await;
        }
        if let Some(first_name) = &payload.first_name {
            require_text("first_name", first_name, PERSON_NAME_MAX)?;
        }
        if let Some(last_name) = &payload.last_name {
            require_text("last_name", last_name, PERSON_NAME_MAX)?;
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE author SET ");
        let mut sets = qb.separated(", ");
        if let Some(first_name) = &payload.first_name {
            sets.push("first_name = ").push_bind_unseparated(first_name);
        }
        if let Some(last_name) = &payload.last_name {
            sets.push("last_name = ").push_bind_unseparated(last_name);
        }
        if let Some(date_of_birth) = payload.date_of_birth {
            sets.push("date_of_birth = ").push_bind_unseparated(date_of_birth);
        }
        if let Some(date_of_death) = payload.date_of_death {
            sets.push("date_of_death = ").push_bind_unseparated(date_of_death);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {}", AUTHOR_COLUMNS));
        let row = qb.build_query_as::<Author>().fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete author");
        let result = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

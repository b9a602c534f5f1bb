use super::{double_option, page};
use crate::error::AppError;
use crate::models::{fresh_instance_id, BookInstance, LoanStatus};
use crate::validation::{require_text, IMPRINT_MAX};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Copies are always read through a left join so the display string can name
/// the book even after the book row is gone.
const INSTANCE_SELECT: &str = "SELECT i.id, i.book_id, b.title AS book_title, i.imprint, \
     i.due_back, i.status \
     FROM book_instance i LEFT JOIN book b ON b.id = i.book_id";

#[derive(Debug, Deserialize)]
pub struct NewInstance {
    pub book_id: Option<i64>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstanceUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub book_id: Option<Option<i64>>,
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceFilter {
    pub status: Option<LoanStatus>,
    pub due_back: Option<NaiveDate>,
    pub book_id: Option<i64>,
}

pub struct InstanceService;

impl InstanceService {
    /// List copies in natural order (due_back ascending, database-default
    /// null placement), with optional exact-match filters.
    pub async fn list(
        pool: &PgPool,
        filter: InstanceFilter,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<BookInstance>, AppError> {
        let (limit, offset) = page(limit, offset);
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(INSTANCE_SELECT);
        let mut clause = " WHERE ";
        if let Some(status) = filter.status {
            qb.push(clause).push("i.status = ").push_bind(status.code());
            clause = " AND ";
        }
        if let Some(due_back) = filter.due_back {
            qb.push(clause).push("i.due_back = ").push_bind(due_back);
            clause = " AND ";
        }
        if let Some(book_id) = filter.book_id {
            qb.push(clause).push("i.book_id = ").push_bind(book_id);
        }
        qb.push(" ORDER BY i.due_back LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build_query_as::<BookInstance>().fetch_all(pool).await?;
        Ok(rows)
    }

    /// Copies of one book, for the admin inline.
    pub async fn list_by_book(pool: &PgPool, book_id: i64) -> Result<Vec<BookInstance>, AppError> {
        let filter = InstanceFilter {
            book_id: Some(book_id),
            ..InstanceFilter::default()
        };
        Self::list(pool, filter, None, None).await
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<BookInstance>, AppError> {
        let row = sqlx::query_as::<_, BookInstance>(&format!("{} WHERE i.id = $1", INSTANCE_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Create a copy. The id is always generated here; it is never taken from
    /// the payload and never sequential.
    pub async fn create(pool: &PgPool, payload: &NewInstance) -> Result<BookInstance, AppError> {
        require_text("imprint", &payload.imprint, IMPRINT_MAX)?;
        let id = fresh_instance_id();
        tracing::debug!(%id, "create book instance");
        sqlx::query(
            "INSERT INTO book_instance (id, book_id, imprint, due_back, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(payload.book_id)
        .bind(&payload.imprint)
        .bind(payload.due_back)
        .bind(payload.status.code())
        .execute(pool)
        .await?;
        let row = Self::get(pool, id)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        payload: &InstanceUpdate,
    ) -> Result<Option<BookInstance>, AppError> {
        let has_change = payload.book_id.is_some()
            || payload.imprint.is_some()
            || payload.due_back.is_some()
            || payload.status.is_some();
        if !has_change {
            return Self::get(pool, id).await;
        }
        if let Some(imprint) = &payload.imprint {
            require_text("imprint", imprint, IMPRINT_MAX)?;
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE book_instance SET ");
        let mut sets = qb.separated(", ");
        if let Some(book_id) = payload.book_id {
            sets.push("book_id = ").push_bind_unseparated(book_id);
        }
        if let Some(imprint) = &payload.imprint {
            sets.push("imprint = ").push_bind_unseparated(imprint);
        }
        if let Some(due_back) = payload.due_back {
            sets.push("due_back = ").push_bind_unseparated(due_back);
        }
        if let Some(status) = payload.status {
            sets.push("status = ").push_bind_unseparated(status.code());
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING id");
        let updated: Option<Uuid> = qb.build_query_scalar().fetch_optional(pool).await?;
        if updated.is_none() {
            return Ok(None);
        }
        Self::get(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        tracing::debug!(%id, "delete book instance");
        let result = sqlx::query("DELETE FROM book_instance WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

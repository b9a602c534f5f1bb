use super::{double_option, page};
use crate::error::AppError;
use crate::models::{summarize_genres, Book, BookDetail, Genre};
use crate::validation::{require_text, ISBN_MAX, SUMMARY_MAX, TITLE_MAX};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

/// Scalar subquery computing the derived genre summary for the aliased book
/// row `b`: first three genre names in genre-id order, joined by ", ".
const GENRE_SUMMARY_SUBQUERY: &str = "(SELECT COALESCE(string_agg(g.name, ', '), '') \
     FROM (SELECT g2.name FROM genre g2 \
           JOIN book_genre bg ON bg.genre_id = g2.id \
           WHERE bg.book_id = b.id ORDER BY g2.id LIMIT 3) g)";

#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author_id: Option<i64>,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub author_id: Option<Option<i64>>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    /// When present, replaces the book's full genre set.
    pub genre_ids: Option<Vec<i64>>,
}

/// Change-list row for the admin console: title plus display columns.
#[derive(Debug, Serialize, FromRow)]
pub struct BookChangeRow {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub genre_summary: String,
}

pub struct BookService;

impl BookService {
    pub async fn list(
        pool: &PgPool,
        author_id: Option<i64>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Book>, AppError> {
        let (limit, offset) = page(limit, offset);
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT b.id, b.title, b.author_id, b.summary, b.isbn, {} AS genre_summary FROM book b",
            GENRE_SUMMARY_SUBQUERY
        ));
        if let Some(author_id) = author_id {
            qb.push(" WHERE b.author_id = ").push_bind(author_id);
        }
        qb.push(" ORDER BY b.id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let rows = qb.build_query_as::<Book>().fetch_all(pool).await?;
        Ok(rows)
    }

    /// Books by one author, for the admin inline.
    pub async fn list_by_author(pool: &PgPool, author_id: i64) -> Result<Vec<Book>, AppError> {
        Self::list(pool, Some(author_id), None, None).await
    }

    pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, Book>(&format!(
            "SELECT b.id, b.title, b.author_id, b.summary, b.isbn, {} AS genre_summary \
             FROM book b WHERE b.id = $1",
            GENRE_SUMMARY_SUBQUERY
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Book plus its full genre rows.
    pub async fn detail(pool: &PgPool, id: i64) -> Result<Option<BookDetail>, AppError> {
        let Some(book) = Self::get(pool, id).await? else {
            return Ok(None);
        };
        let genres = Self::genres_of(pool, id).await?;
        Ok(Some(BookDetail { book, genres }))
    }

    pub async fn genres_of(pool: &PgPool, book_id: i64) -> Result<Vec<Genre>, AppError> {
        let rows = sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name FROM genre g \
             JOIN book_genre bg ON bg.genre_id = g.id \
             WHERE bg.book_id = $1 ORDER BY g.id",
        )
        .bind(book_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Create the book and its genre relation rows in one transaction.
    pub async fn create(pool: &PgPool, payload: &NewBook) -> Result<Book, AppError> {
        require_text("title", &payload.title, TITLE_MAX)?;
        require_text("summary", &payload.summary, SUMMARY_MAX)?;
        require_text("isbn", &payload.isbn, ISBN_MAX)?;
        tracing::debug!(title = %payload.title, "create book");
        let mut tx = pool.begin().await?;
        let mut book = sqlx::query_as::<_, Book>(
            "INSERT INTO book (title, author_id, summary, isbn) VALUES ($1, $2, $3, $4) \
             RETURNING id, title, author_id, summary, isbn",
        )
        .bind(&payload.title)
        .bind(payload.author_id)
        .bind(&payload.summary)
        .bind(&payload.isbn)
        .fetch_one(&mut *tx)
        .await?;
        Self::replace_genres(&mut tx, book.id, &payload.genre_ids).await?;
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT g.name FROM genre g JOIN book_genre bg ON bg.genre_id = g.id \
             WHERE bg.book_id = $1 ORDER BY g.id",
        )
        .bind(book.id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        book.genre_summary = Some(summarize_genres(names.iter().map(String::as_str)));
        Ok(book)
    }

    /// Partial update; a present `genre_ids` replaces the whole genre set.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        payload: &BookUpdate,
    ) -> Result<Option<Book>, AppError> {
        if let Some(title) = &payload.title {
            require_text("title", title, TITLE_MAX)?;
        }
        if let Some(summary) = &payload.summary {
            require_text("summary", summary, SUMMARY_MAX)?;
        }
        if let Some(isbn) = &payload.isbn {
            require_text("isbn", isbn, ISBN_MAX)?;
        }
        let has_column_change = payload.title.is_some()
            || payload.author_id.is_some()
            || payload.summary.is_some()
            || payload.isbn.is_some();

        let mut tx = pool.begin().await?;
        if has_column_change {
            let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE book SET ");
            let mut sets = qb.separated(", ");
            if let Some(title) = &payload.title {
                sets.push("title = ").push_bind_unseparated(title);
            }
            if let Some(author_id) = payload.author_id {
                sets.push("author_id = ").push_bind_unseparated(author_id);
            }
            if let Some(summary) = &payload.summary {
                sets.push("summary = ").push_bind_unseparated(summary);
            }
            if let Some(isbn) = &payload.isbn {
                sets.push("isbn = ").push_bind_unseparated(isbn);
            }
            qb.push(" WHERE id = ").push_bind(id).push(" RETURNING id");
            let updated: Option<i64> = qb.build_query_scalar().fetch_optional(&mut *tx).await?;
            if updated.is_none() {
                return Ok(None);
            }
        } else {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM book WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Ok(None);
            }
        }
        if let Some(genre_ids) = &payload.genre_ids {
            Self::replace_genres(&mut tx, id, genre_ids).await?;
        }
        tx.commit().await?;
        Self::get(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete book");
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Change-list rows with author display string and genre summary.
    pub async fn change_list(
        pool: &PgPool,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<BookChangeRow>, AppError> {
        let (limit, offset) = page(limit, offset);
        let rows = sqlx::query_as::<_, BookChangeRow>(&format!(
            "SELECT b.id, b.title, \
             (SELECT a.last_name || ', ' || a.first_name FROM author a WHERE a.id = b.author_id) AS author, \
             {} AS genre_summary \
             FROM book b ORDER BY b.id LIMIT $1 OFFSET $2",
            GENRE_SUMMARY_SUBQUERY
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    async fn replace_genres(
        tx: &mut PgConnection,
        book_id: i64,
        genre_ids: &[i64],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM book_genre WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        for genre_id in genre_ids {
            sqlx::query("INSERT INTO book_genre (book_id, genre_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }
        Ok(())
    }
}

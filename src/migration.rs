//! First-run DDL: catalog tables, join table, foreign keys, ordering indexes.
//!
//! Deleting an author or a book must never delete the rows that reference it;
//! both entity foreign keys are ON DELETE SET NULL. Only the book_genre join
//! rows cascade, since they are relation records rather than entities.

use crate::error::AppError;
use sqlx::PgPool;

const SCHEMA_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS genre (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS language (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS author (
        id BIGSERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        date_of_birth DATE,
        date_of_death DATE
    )",
    "CREATE TABLE IF NOT EXISTS book (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        author_id BIGINT REFERENCES author(id) ON DELETE SET NULL,
        summary TEXT NOT NULL,
        isbn TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS book_genre (
        book_id BIGINT NOT NULL REFERENCES book(id) ON DELETE CASCADE,
        genre_id BIGINT NOT NULL REFERENCES genre(id) ON DELETE CASCADE,
        PRIMARY KEY (book_id, genre_id)
    )",
    "CREATE TABLE IF NOT EXISTS book_instance (
        id UUID PRIMARY KEY,
        book_id BIGINT REFERENCES book(id) ON DELETE SET NULL,
        imprint TEXT NOT NULL,
        due_back DATE,
        status TEXT NOT NULL DEFAULT 'm'
    )",
    "CREATE INDEX IF NOT EXISTS author_name_idx ON author (last_name, first_name)",
    "CREATE INDEX IF NOT EXISTS book_author_idx ON book (author_id)",
    "CREATE INDEX IF NOT EXISTS book_genre_genre_idx ON book_genre (genre_id)",
    "CREATE INDEX IF NOT EXISTS book_instance_due_back_idx ON book_instance (due_back)",
    "CREATE INDEX IF NOT EXISTS book_instance_book_idx ON book_instance (book_id)",
];

/// Apply the catalog schema. Idempotent; statements run in dependency order.
pub async fn apply_schema(pool: &PgPool) -> Result<(), AppError> {
    for stmt in SCHEMA_DDL {
        tracing::debug!(sql = %stmt, "ddl");
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::info!("catalog schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SCHEMA_DDL;

    fn ddl_for(table: &str) -> &'static str {
        let needle = format!("TABLE IF NOT EXISTS {} ", table);
        SCHEMA_DDL
            .iter()
            .copied()
            .find(|s| s.contains(&needle))
            .unwrap_or_else(|| panic!("no ddl for {}", table))
    }

    #[test]
    fn deleting_an_author_nulls_book_references() {
        let book = ddl_for("book");
        assert!(book.contains("REFERENCES author(id) ON DELETE SET NULL"));
        assert!(!book.contains("CASCADE"));
    }

    #[test]
    fn deleting_a_book_nulls_instance_references() {
        let copy = ddl_for("book_instance");
        assert!(copy.contains("REFERENCES book(id) ON DELETE SET NULL"));
        assert!(!copy.contains("CASCADE"));
    }

    #[test]
    fn join_rows_follow_their_endpoints() {
        let join = ddl_for("book_genre");
        assert!(join.contains("REFERENCES book(id) ON DELETE CASCADE"));
        assert!(join.contains("REFERENCES genre(id) ON DELETE CASCADE"));
    }

    #[test]
    fn instance_ids_are_uuids_and_default_status_is_maintenance() {
        let copy = ddl_for("book_instance");
        assert!(copy.contains("id UUID PRIMARY KEY"));
        assert!(copy.contains("status TEXT NOT NULL DEFAULT 'm'"));
    }
}

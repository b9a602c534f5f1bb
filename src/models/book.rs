use super::Genre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A book title (not a physical copy; see [`super::BookInstance`]).
///
/// `genre_summary` is a derived read value: the first three genre names
/// joined by ", ". List and detail queries populate it; write paths leave it
/// unset until re-read.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author_id: Option<i64>,
    pub summary: String,
    pub isbn: String,
    #[sqlx(default)]
    pub genre_summary: Option<String>,
}

impl Book {
    /// Canonical detail-page address for this book.
    pub fn detail_url(&self) -> String {
        format!("/catalog/books/{}", self.id)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A book plus its full genre rows, for detail responses.
#[derive(Clone, Debug, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub genres: Vec<Genre>,
}

/// First three genre names joined by ", " (genre-id order is the caller's
/// responsibility).
pub fn summarize_genres<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().take(3).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_title() {
        let book = Book {
            id: 3,
            title: "Dune".into(),
            author_id: None,
            summary: String::new(),
            isbn: String::new(),
            genre_summary: None,
        };
        assert_eq!(book.to_string(), "Dune");
        assert_eq!(book.detail_url(), "/catalog/books/3");
    }

    #[test]
    fn summary_caps_at_three_genres() {
        let names = ["Fantasy", "Horror", "Mystery", "Romance", "Satire"];
        let summary = summarize_genres(names);
        assert_eq!(summary, "Fantasy, Horror, Mystery");
        assert_eq!(summary.split(", ").count(), 3);
    }

    #[test]
    fn summary_with_fewer_genres_keeps_all() {
        assert_eq!(summarize_genres(["Poetry"]), "Poetry");
        assert_eq!(summarize_genres(std::iter::empty::<&str>()), "");
    }
}

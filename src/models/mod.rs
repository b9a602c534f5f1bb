//! Typed catalog entities.

pub mod author;
pub mod book;
pub mod genre;
pub mod instance;
pub mod language;

pub use author::Author;
pub use book::{summarize_genres, Book, BookDetail};
pub use genre::Genre;
pub use instance::{fresh_instance_id, BookInstance, LoanStatus};
pub use language::Language;

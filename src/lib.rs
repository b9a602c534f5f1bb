//! Library catalog backend: typed entities, REST CRUD, and a declarative
//! admin console over PostgreSQL.

pub mod admin;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
mod validation;

pub use admin::{default_site, AdminSite, FieldGroup, InlineSpec, ModelAdmin};
pub use error::AppError;
pub use migration::apply_schema;
pub use models::{Author, Book, BookInstance, Genre, Language, LoanStatus};
pub use routes::{admin_routes, catalog_routes, common_routes, common_routes_with_ready};
pub use state::AppState;
pub use store::ensure_database_exists;

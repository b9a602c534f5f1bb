//! Axum handlers: REST CRUD per entity and the generic admin console.

pub mod admin;
pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;
pub mod languages;

//! REST CRUD routes for the five catalog entities. Mount under /catalog.

use crate::handlers::{authors, books, genres, instances, languages};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/authors", get(authors::list).post(authors::create))
        .route(
            "/authors/:id",
            get(authors::read).patch(authors::update).delete(authors::delete),
        )
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/:id",
            get(books::read).patch(books::update).delete(books::delete),
        )
        .route("/genres", get(genres::list).post(genres::create))
        .route(
            "/genres/:id",
            get(genres::read).patch(genres::update).delete(genres::delete),
        )
        .route("/languages", get(languages::list).post(languages::create))
        .route(
            "/languages/:id",
            get(languages::read)
                .patch(languages::update)
                .delete(languages::delete),
        )
        .route("/bookinstances", get(instances::list).post(instances::create))
        .route(
            "/bookinstances/:id",
            get(instances::read)
                .patch(instances::update)
                .delete(instances::delete),
        )
        .with_state(state)
}

//! Declarative admin-site registration.
//!
//! Each registered model declares which columns its change list shows, which
//! fields may be filtered on, how edit fields are grouped, and which related
//! models appear inline on its detail page. The generic handlers in
//! `handlers::admin` consume this configuration only; they carry no
//! per-model presentation logic.

use serde::Serialize;
use std::collections::HashMap;

/// One group of edit fields, optionally titled ("Availability" etc.).
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldGroup {
    pub title: Option<&'static str>,
    pub fields: &'static [&'static str],
}

/// A related model shown inline on the parent's detail page.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct InlineSpec {
    /// Path segment of the related model (e.g. "books").
    pub model: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ModelAdmin {
    pub path_segment: &'static str,
    pub name: &'static str,
    /// Change-list columns. Empty means every column of the row.
    pub list_display: &'static [&'static str],
    /// Fields the change list may be filtered on.
    pub list_filter: &'static [&'static str],
    /// Edit-field grouping. Empty means one unnamed group of all fields.
    pub field_groups: &'static [FieldGroup],
    pub inlines: &'static [InlineSpec],
}

/// Registered models, looked up by path segment.
#[derive(Clone, Debug, Default)]
pub struct AdminSite {
    models: Vec<ModelAdmin>,
    by_path: HashMap<&'static str, usize>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ModelAdmin) {
        self.by_path.insert(model.path_segment, self.models.len());
        self.models.push(model);
    }

    pub fn model_by_path(&self, path: &str) -> Option<&ModelAdmin> {
        self.by_path.get(path).map(|&i| &self.models[i])
    }

    pub fn models(&self) -> &[ModelAdmin] {
        &self.models
    }
}

/// The catalog's admin site: Author, Book, BookInstance, and Genre.
/// Language is deliberately unregistered; it is reachable only through the
/// REST surface.
pub fn default_site() -> AdminSite {
    let mut site = AdminSite::new();
    site.register(ModelAdmin {
        path_segment: "authors",
        name: "Author",
        list_display: &["last_name", "first_name", "date_of_birth", "date_of_death"],
        list_filter: &[],
        field_groups: &[
            FieldGroup {
                title: None,
                fields: &["first_name", "last_name"],
            },
            FieldGroup {
                title: None,
                fields: &["date_of_birth", "date_of_death"],
            },
        ],
        inlines: &[InlineSpec { model: "books" }],
    });
    site.register(ModelAdmin {
        path_segment: "books",
        name: "Book",
        list_display: &["title", "author", "genre_summary"],
        list_filter: &[],
        field_groups: &[],
        inlines: &[InlineSpec {
            model: "bookinstances",
        }],
    });
    site.register(ModelAdmin {
        path_segment: "bookinstances",
        name: "Book instance",
        list_display: &[],
        list_filter: &["status", "due_back"],
        field_groups: &[
            FieldGroup {
                title: None,
                fields: &["book_id", "imprint", "id"],
            },
            FieldGroup {
                title: Some("Availability"),
                fields: &["status", "due_back"],
            },
        ],
        inlines: &[],
    });
    site.register(ModelAdmin {
        path_segment: "genres",
        name: "Genre",
        list_display: &[],
        list_filter: &[],
        field_groups: &[],
        inlines: &[],
    });
    site
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_four_models_without_language() {
        let site = default_site();
        assert_eq!(site.models().len(), 4);
        assert!(site.model_by_path("languages").is_none());
        for path in ["authors", "books", "bookinstances", "genres"] {
            assert!(site.model_by_path(path).is_some(), "{} missing", path);
        }
    }

    #[test]
    fn book_change_list_shows_title_author_and_genre_summary() {
        let site = default_site();
        let book = site.model_by_path("books").unwrap();
        assert_eq!(book.list_display, ["title", "author", "genre_summary"]);
        assert_eq!(book.inlines.len(), 1);
        assert_eq!(book.inlines[0].model, "bookinstances");
    }

    #[test]
    fn instance_filters_are_status_and_due_back() {
        let site = default_site();
        let copies = site.model_by_path("bookinstances").unwrap();
        assert_eq!(copies.list_filter, ["status", "due_back"]);
        assert_eq!(copies.field_groups[1].title, Some("Availability"));
    }
}

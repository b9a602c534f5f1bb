//! Catalog behavior exercised through the public API: display strings,
//! derived genre summaries, id generation, and the admin registrations.

use chrono::NaiveDate;
use library_catalog::models::{fresh_instance_id, summarize_genres, BookInstance, LoanStatus};
use library_catalog::{default_site, Author, Book};

fn sample_author() -> Author {
    Author {
        id: 1,
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1960, 5, 2),
        date_of_death: None,
    }
}

#[test]
fn author_display_is_last_name_comma_first_name() {
    assert_eq!(sample_author().to_string(), "Smith, Jane");
}

#[test]
fn author_and_book_expose_detail_urls() {
    assert_eq!(sample_author().detail_url(), "/catalog/authors/1");
    let book = Book {
        id: 42,
        title: "Dune".into(),
        author_id: Some(1),
        summary: "Desert planet".into(),
        isbn: "9780441172719".into(),
        genre_summary: None,
    };
    assert_eq!(book.detail_url(), "/catalog/books/42");
    assert_eq!(book.to_string(), "Dune");
}

#[test]
fn genre_summary_with_four_or_more_genres_has_exactly_three_names() {
    let names = ["Science Fiction", "Adventure", "Classic", "Space Opera"];
    let summary = summarize_genres(names);
    assert_eq!(summary.split(", ").count(), 3);
    assert_eq!(summary, "Science Fiction, Adventure, Classic");
}

#[test]
fn instance_ids_are_distinct_in_rapid_succession() {
    let first = fresh_instance_id();
    let second = fresh_instance_id();
    assert_ne!(first, second);
}

#[test]
fn unset_status_defaults_to_maintenance_code_m() {
    let status = LoanStatus::default();
    assert_eq!(status, LoanStatus::Maintenance);
    assert_eq!(status.code(), "m");
    // The wire form is the one-character code.
    assert_eq!(serde_json::to_value(status).unwrap(), "m");
}

#[test]
fn status_deserializes_from_codes_only() {
    assert_eq!(
        serde_json::from_value::<LoanStatus>(serde_json::json!("o")).unwrap(),
        LoanStatus::OnLoan
    );
    assert!(serde_json::from_value::<LoanStatus>(serde_json::json!("x")).is_err());
}

#[test]
fn instance_display_composes_id_book_status_and_due_date() {
    let id = fresh_instance_id();
    let copy = BookInstance {
        id,
        book_id: Some(42),
        book_title: Some("Dune".into()),
        imprint: "Ace, 1990".into(),
        due_back: NaiveDate::from_ymd_opt(2026, 9, 15),
        status: LoanStatus::Available,
    };
    assert_eq!(copy.to_string(), format!("{} (Dune) Available 2026-09-15", id));
}

#[test]
fn admin_site_registers_the_original_models() {
    let site = default_site();
    let author = site.model_by_path("authors").expect("authors registered");
    assert_eq!(
        author.list_display,
        ["last_name", "first_name", "date_of_birth", "date_of_death"]
    );
    assert_eq!(author.inlines[0].model, "books");

    let copies = site.model_by_path("bookinstances").expect("registered");
    assert_eq!(copies.list_filter, ["status", "due_back"]);

    // Language never appears in the admin console.
    assert!(site.model_by_path("languages").is_none());
}

//! Per-entity CRUD execution against PostgreSQL.

pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;
pub mod languages;

pub use authors::AuthorService;
pub use books::BookService;
pub use genres::GenreService;
pub use instances::InstanceService;
pub use languages::LanguageService;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1000;

/// Clamp list paging: limit default 100, max 1000; offset default 0.
pub(crate) fn page(limit: Option<u32>, offset: Option<u32>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    (i64::from(limit), i64::from(offset.unwrap_or(0)))
}

/// Deserialize a PATCH field so that an absent key and an explicit null can
/// be told apart: absent stays None, null becomes Some(None).
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::page;

    #[test]
    fn paging_defaults_and_clamps() {
        assert_eq!(page(None, None), (100, 0));
        assert_eq!(page(Some(10), Some(30)), (10, 30));
        assert_eq!(page(Some(9999), None), (1000, 0));
    }
}

//! Field-constraint checks applied to write payloads before SQL.

use crate::error::AppError;

pub(crate) const NAME_MAX: usize = 200;
pub(crate) const PERSON_NAME_MAX: usize = 100;
pub(crate) const TITLE_MAX: usize = 200;
pub(crate) const SUMMARY_MAX: usize = 1000;
pub(crate) const ISBN_MAX: usize = 13;
pub(crate) const IMPRINT_MAX: usize = 200;

/// Required text field: non-empty and at most `max` characters.
pub(crate) fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    check_len(field, value, max)
}

pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_field_is_rejected() {
        assert!(require_text("name", "", NAME_MAX).is_err());
        assert!(require_text("name", "   ", NAME_MAX).is_err());
        assert!(require_text("name", "Poetry", NAME_MAX).is_ok());
    }

    #[test]
    fn over_long_field_is_rejected() {
        let long = "x".repeat(14);
        assert!(check_len("isbn", &long, ISBN_MAX).is_err());
        assert!(check_len("isbn", "9780451524935", ISBN_MAX).is_ok());
    }
}

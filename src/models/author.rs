use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// An author. Natural ordering is last_name, then first_name.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Canonical detail-page address for this author.
    pub fn detail_url(&self) -> String {
        format!("/catalog/authors/{}", self.id)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(last: &str, first: &str) -> Author {
        Author {
            id: 7,
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn display_is_last_name_comma_first_name() {
        assert_eq!(author("Smith", "Jane").to_string(), "Smith, Jane");
    }

    #[test]
    fn detail_url_uses_id() {
        assert_eq!(author("Smith", "Jane").detail_url(), "/catalog/authors/7");
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Loan status of a copy. Stored as a one-character code; Maintenance is the
/// default for freshly created copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Maintenance,
        LoanStatus::OnLoan,
        LoanStatus::Available,
        LoanStatus::Reserved,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.code().to_string()
    }
}

impl TryFrom<String> for LoanStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LoanStatus::from_code(&value).ok_or_else(|| format!("unknown status code '{}'", value))
    }
}

/// Id for a new copy. Unique across the whole catalog, never sequential.
pub fn fresh_instance_id() -> Uuid {
    Uuid::new_v4()
}

/// A physical copy of a book that can be loaned out.
///
/// `book_title` is carried by every read query (left join on book) so the
/// display string can name the book; it is None once the book is deleted.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Option<i64>,
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: LoanStatus,
}

impl fmt::Display for BookInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.book_title.as_deref().unwrap_or("no book");
        match self.due_back {
            Some(due) => write!(f, "{} ({}) {} {}", self.id, title, self.status, due),
            None => write!(f, "{} ({}) {}", self.id, title, self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
        assert_eq!(LoanStatus::default().code(), "m");
    }

    #[test]
    fn codes_round_trip() {
        for status in LoanStatus::ALL {
            assert_eq!(LoanStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(LoanStatus::from_code("x"), None);
    }

    #[test]
    fn fresh_ids_are_distinct() {
        // Rapid succession must still yield distinct ids.
        let ids: Vec<_> = (0..64).map(|_| fresh_instance_id()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_composes_id_title_status_and_due_date() {
        let id = fresh_instance_id();
        let copy = BookInstance {
            id,
            book_id: Some(1),
            book_title: Some("Dune".into()),
            imprint: "Ace, 1990".into(),
            due_back: Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            status: LoanStatus::OnLoan,
        };
        assert_eq!(copy.to_string(), format!("{} (Dune) On loan 2026-03-01", id));
    }
}

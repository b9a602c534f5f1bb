use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A book's natural language (e.g. English, French, Japanese).
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Language {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

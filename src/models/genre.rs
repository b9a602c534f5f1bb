use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A book genre (e.g. Science Fiction).
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

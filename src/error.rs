// Bookshelf Error Types

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Field name -> message mapping produced by create/update validation.
/// Collects every failing field so the form can show all errors at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

#[derive(Error, Debug)]
pub enum BookshelfError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Book not found: {0}")]
    BookNotFound(i64),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for BookshelfError {
    fn from(err: anyhow::Error) -> Self {
        BookshelfError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookshelfError>;

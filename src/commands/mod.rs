// Bookshelf - Commands Module
// Tauri commands organized by domain

pub mod books;
pub mod last_opened;

// Re-export all commands for easy registration
pub use books::*;
pub use last_opened::*;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::Connection;
use serde::Serialize;

use crate::error::BookshelfError;

/// Database state managed by Tauri: the single connection opened at startup
/// and shared by every command. The mutex serializes store access.
pub struct DbState(pub Mutex<Connection>);

/// Path of the last-opened snapshot file, resolved once at startup.
pub struct LastOpenedState {
    pub path: PathBuf,
}

/// Error payload crossing the IPC boundary. Tagged so the frontend can
/// branch on kind; validation carries the full field -> message map.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandError {
    Validation { fields: BTreeMap<String, String> },
    NotFound { message: String },
    Storage { message: String },
}

impl CommandError {
    pub fn storage(message: impl Into<String>) -> Self {
        CommandError::Storage {
            message: message.into(),
        }
    }
}

impl From<BookshelfError> for CommandError {
    fn from(err: BookshelfError) -> Self {
        match err {
            BookshelfError::Validation(errors) => CommandError::Validation {
                fields: errors.fields,
            },
            BookshelfError::BookNotFound(id) => CommandError::NotFound {
                message: format!("Book {} not found", id),
            },
            other => CommandError::Storage {
                message: other.to_string(),
            },
        }
    }
}

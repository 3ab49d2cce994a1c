// Last-opened book tracker
// A single JSON file slot holding a point-in-time copy of the book that was
// most recently opened. Last write wins. The snapshot is deliberately not
// reconciled when the underlying row is later edited or deleted.

use std::path::{Path, PathBuf};

use crate::constants::{BOOKSHELF_FOLDER, LAST_OPENED_FILENAME};
use crate::db::schema::Book;
use crate::error::Result;

/// Get the path to ~/.bookshelf/last_opened.json
pub fn get_last_opened_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(BOOKSHELF_FOLDER).join(LAST_OPENED_FILENAME))
}

/// The fixed book shown on the home screen before anything has been opened.
/// Display-only: it is never written to the snapshot file or the store.
pub fn placeholder() -> Book {
    Book {
        id: 0,
        title: "Sapiens".to_string(),
        author: "Yuval Noah Harari".to_string(),
        description: "Il y a 100 000 ans, la Terre était habitée par au moins six \
                      espèces différentes d’hominidés. Une seule a survécu. Nous, \
                      les ’Homo Sapiens’"
            .to_string(),
        cover_image_path: Some("../assets/images/sapiens.jpg".to_string()),
        progress: 45,
    }
}

/// Overwrite the snapshot slot with a copy of the given book's fields.
pub fn record_opened(path: &Path, book: &Book) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(book)?;
    std::fs::write(path, json)?;

    Ok(())
}

/// Read the stored snapshot, or the placeholder if none has been recorded.
/// An unreadable or unparseable file falls back to the placeholder too; the
/// slot is display-only state and never worth failing a screen over.
pub fn get_last_opened(path: &Path) -> Book {
    if !path.exists() {
        return placeholder();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to read last-opened snapshot: {}", e);
            return placeholder();
        }
    };

    match serde_json::from_str(&content) {
        Ok(book) => book,
        Err(e) => {
            log::warn!("Failed to parse last-opened snapshot: {}", e);
            placeholder()
        }
    }
}

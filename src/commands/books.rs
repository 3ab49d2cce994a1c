// Bookshelf - Book Commands
// CRUD and progress adjustment over the books table. Each command locks the
// shared connection for the duration of one store operation.

use tauri::State;

use crate::db::schema::{self, Book, BookUpdate, NewBook};
use super::{CommandError, DbState};

/// Create a book from the add-book form. A validation failure carries every
/// empty field at once so the form can highlight all of them.
#[tauri::command]
pub fn create_book(state: State<DbState>, book: NewBook) -> Result<Book, CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::insert_book(&conn, &book).map_err(CommandError::from)
}

/// List all books for the library screen.
#[tauri::command]
pub fn get_books(state: State<DbState>) -> Result<Vec<Book>, CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::list_books(&conn).map_err(CommandError::from)
}

/// Get a single book for the detail screen. `None` means the detail screen
/// renders its "book not found" state.
#[tauri::command]
pub fn get_book(state: State<DbState>, id: i64) -> Result<Option<Book>, CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::get_book(&conn, id).map_err(CommandError::from)
}

/// Apply a partial edit to a book.
#[tauri::command]
pub fn update_book(
    state: State<DbState>,
    id: i64,
    update: BookUpdate,
) -> Result<Book, CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::update_book(&conn, id, &update).map_err(CommandError::from)
}

/// Adjust reading progress by a signed delta (the detail screen passes +/-10).
/// Returns the new clamped value.
#[tauri::command]
pub fn update_book_progress(
    state: State<DbState>,
    id: i64,
    delta: i64,
) -> Result<i64, CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::update_book_progress(&conn, id, delta).map_err(CommandError::from)
}

/// Delete a book. Safe to invoke twice; the second call is a no-op.
#[tauri::command]
pub fn delete_book(state: State<DbState>, id: i64) -> Result<(), CommandError> {
    let conn = state.0.lock().map_err(|e| CommandError::storage(e.to_string()))?;
    schema::delete_book(&conn, id).map_err(CommandError::from)
}

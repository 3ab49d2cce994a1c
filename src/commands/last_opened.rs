// Bookshelf - Last Opened Commands
// The detail screen records the book it is showing; the home screen reads
// the snapshot back (or the first-run placeholder).

use tauri::State;

use crate::db::schema::Book;
use super::{CommandError, LastOpenedState};

/// Overwrite the last-opened slot with a snapshot of the given book.
#[tauri::command]
pub fn record_opened(state: State<LastOpenedState>, book: Book) -> Result<(), CommandError> {
    crate::last_opened::record_opened(&state.path, &book).map_err(CommandError::from)
}

/// Get the last-opened snapshot for the home screen. Never fails over a
/// missing slot; first run gets the placeholder book.
#[tauri::command]
pub fn get_last_opened(state: State<LastOpenedState>) -> Book {
    crate::last_opened::get_last_opened(&state.path)
}

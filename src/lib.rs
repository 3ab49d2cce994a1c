// Bookshelf - Tauri Library Entry Point

pub mod constants;
pub mod error;
pub mod db;
pub mod last_opened;
pub mod commands;

use std::sync::Mutex;

use tauri::Manager;

use commands::{DbState, LastOpenedState};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::new().build())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Schema bootstrap runs exactly once here; every command reuses
            // this connection. A failure aborts startup.
            let db_path = db::get_db_path()?;
            let conn = db::open_db(&db_path)?;
            app.manage(DbState(Mutex::new(conn)));

            let snapshot_path = last_opened::get_last_opened_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
            app.manage(LastOpenedState {
                path: snapshot_path,
            });

            log::info!("Bookshelf started, database at {}", db_path.display());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::create_book,
            commands::get_books,
            commands::get_book,
            commands::update_book,
            commands::update_book_progress,
            commands::delete_book,
            commands::record_opened,
            commands::get_last_opened,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

// Bookshelf Constants

// Paths
pub const BOOKSHELF_FOLDER: &str = ".bookshelf";
pub const DB_FILENAME: &str = "books.db";
pub const LAST_OPENED_FILENAME: &str = "last_opened.json";

// Reading progress (integer percentage)
pub const PROGRESS_MIN: i64 = 0;
pub const PROGRESS_MAX: i64 = 100;

// Step applied by the detail screen's +/- buttons
pub const PROGRESS_STEP: i64 = 10;

// Database schema types and query helpers

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::constants::{PROGRESS_MAX, PROGRESS_MIN};
use crate::error::{BookshelfError, Result, ValidationErrors};

// ----- Book -----

/// A persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image_path: Option<String>,
    pub progress: i64,
}

/// Input for creating a book. Progress defaults to 0 when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(default)]
    pub cover_image_path: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
}

/// Partial update for a book. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover_image_path: Option<String>,
    pub progress: Option<i64>,
}

/// Saturate a progress value into [0, 100].
pub fn clamp_progress(progress: i64) -> i64 {
    progress.clamp(PROGRESS_MIN, PROGRESS_MAX)
}

fn check_text_field(errors: &mut ValidationErrors, field: &str, message: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Validate create input. Reports every failing field, not just the first.
fn validate_new_book(book: &NewBook) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_text_field(&mut errors, "title", "Title is required", &book.title);
    check_text_field(&mut errors, "author", "Author is required", &book.author);
    check_text_field(
        &mut errors,
        "description",
        "Description is required",
        &book.description,
    );
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate update input: any text field being changed must be non-empty after trim.
fn validate_book_update(update: &BookUpdate) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(ref title) = update.title {
        check_text_field(&mut errors, "title", "Title is required", title);
    }
    if let Some(ref author) = update.author {
        check_text_field(&mut errors, "author", "Author is required", author);
    }
    if let Some(ref description) = update.description {
        check_text_field(
            &mut errors,
            "description",
            "Description is required",
            description,
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Insert a new book. Validation runs before anything is written;
/// a failure names all empty fields and leaves the table untouched.
pub fn insert_book(conn: &Connection, book: &NewBook) -> Result<Book> {
    validate_new_book(book).map_err(BookshelfError::Validation)?;

    let progress = clamp_progress(book.progress.unwrap_or(0));

    conn.execute(
        "INSERT INTO books (title, author, description, cover_image_path, progress)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.author,
            book.description,
            book.cover_image_path,
            progress,
        ],
    )?;

    Ok(Book {
        id: conn.last_insert_rowid(),
        title: book.title.clone(),
        author: book.author.clone(),
        description: book.description.clone(),
        cover_image_path: book.cover_image_path.clone(),
        progress,
    })
}

fn map_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        description: row.get(3)?,
        cover_image_path: row.get(4)?,
        progress: row.get(5)?,
    })
}

/// List all books, ascending id (single batch fetch).
pub fn list_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, description, cover_image_path, progress
         FROM books ORDER BY id ASC",
    )?;

    let books = stmt
        .query_map([], map_book)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(books)
}

/// Get a book by id. Not-found is a normal outcome, not an error.
pub fn get_book(conn: &Connection, id: i64) -> Result<Option<Book>> {
    let result = conn
        .query_row(
            "SELECT id, title, author, description, cover_image_path, progress
             FROM books WHERE id = ?1",
            params![id],
            map_book,
        )
        .optional()?;
    Ok(result)
}

pub fn count_books(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
    Ok(count)
}

/// Apply a signed delta to a book's progress, saturating at [0, 100].
/// The read-modify-write happens inside a single UPDATE so concurrent
/// adjustments to the same id cannot lose updates. Returns the new value.
pub fn update_book_progress(conn: &Connection, id: i64, delta: i64) -> Result<i64> {
    let affected = conn.execute(
        "UPDATE books SET progress = MIN(?1, MAX(?2, progress + ?3)) WHERE id = ?4",
        params![PROGRESS_MAX, PROGRESS_MIN, delta, id],
    )?;

    if affected == 0 {
        return Err(BookshelfError::BookNotFound(id));
    }

    let progress: i64 = conn.query_row(
        "SELECT progress FROM books WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(progress)
}

/// Update a book's fields. Absent fields are left as-is; text fields being
/// changed go through the same validation as create; progress is clamped.
/// Returns the updated record.
pub fn update_book(conn: &Connection, id: i64, update: &BookUpdate) -> Result<Book> {
    validate_book_update(update).map_err(BookshelfError::Validation)?;

    // Existence check up front so a partial update on a missing id is a
    // clean not-found rather than a silent zero-row UPDATE.
    if get_book(conn, id)?.is_none() {
        return Err(BookshelfError::BookNotFound(id));
    }

    let mut set_clauses: Vec<String> = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(ref title) = update.title {
        set_clauses.push(format!("title = ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(title.clone()));
    }
    if let Some(ref author) = update.author {
        set_clauses.push(format!("author = ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(author.clone()));
    }
    if let Some(ref description) = update.description {
        set_clauses.push(format!("description = ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(description.clone()));
    }
    if let Some(ref cover) = update.cover_image_path {
        set_clauses.push(format!("cover_image_path = ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(cover.clone()));
    }
    if let Some(progress) = update.progress {
        set_clauses.push(format!("progress = ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(clamp_progress(progress)));
    }

    if !set_clauses.is_empty() {
        params_vec.push(Box::new(id));
        let sql = format!(
            "UPDATE books SET {} WHERE id = ?{}",
            set_clauses.join(", "),
            params_vec.len()
        );
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;
    }

    get_book(conn, id)?.ok_or(BookshelfError::BookNotFound(id))
}

/// Delete a book. Deleting a missing id is a successful no-op, so a
/// twice-pressed delete button never surfaces an error.
pub fn delete_book(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    /// Set up an in-memory DB with all migrations applied.
    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: "Desert planet saga".to_string(),
            cover_image_path: None,
            progress: Some(0),
        }
    }

    #[test]
    fn test_create_returns_exact_values_and_fresh_id() {
        let conn = setup_test_db();

        let book = insert_book(&conn, &dune()).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.description, "Desert planet saga");
        assert_eq!(book.cover_image_path, None);
        assert_eq!(book.progress, 0);

        let second = insert_book(
            &conn,
            &NewBook {
                title: "Hyperion".to_string(),
                author: "Simmons".to_string(),
                description: "Pilgrims and the Shrike".to_string(),
                cover_image_path: Some("covers/hyperion.jpg".to_string()),
                progress: None,
            },
        )
        .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(
            second.cover_image_path.as_deref(),
            Some("covers/hyperion.jpg")
        );
        assert_eq!(second.progress, 0, "progress defaults to 0 when absent");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let conn = setup_test_db();

        let first = insert_book(&conn, &dune()).unwrap();
        delete_book(&conn, first.id).unwrap();

        let second = insert_book(&conn, &dune()).unwrap();
        assert!(second.id > first.id, "AUTOINCREMENT must not reuse ids");
    }

    #[test]
    fn test_create_rejects_empty_fields_all_at_once() {
        let conn = setup_test_db();

        let err = insert_book(
            &conn,
            &NewBook {
                title: "   ".to_string(),
                author: "".to_string(),
                description: "\t\n".to_string(),
                cover_image_path: None,
                progress: None,
            },
        )
        .unwrap_err();

        match err {
            BookshelfError::Validation(errors) => {
                assert_eq!(errors.fields.len(), 3);
                assert_eq!(errors.fields["title"], "Title is required");
                assert_eq!(errors.fields["author"], "Author is required");
                assert_eq!(errors.fields["description"], "Description is required");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }

        // Nothing was written
        assert_eq!(count_books(&conn).unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_single_empty_field() {
        let conn = setup_test_db();

        let mut input = dune();
        input.author = "  ".to_string();

        let err = insert_book(&conn, &input).unwrap_err();
        match err {
            BookshelfError::Validation(errors) => {
                assert_eq!(errors.fields.len(), 1);
                assert!(errors.fields.contains_key("author"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert_eq!(count_books(&conn).unwrap(), 0);
    }

    #[test]
    fn test_create_clamps_progress() {
        let conn = setup_test_db();

        for (given, expected) in [(-50, 0), (0, 0), (45, 45), (100, 100), (250, 100)] {
            let mut input = dune();
            input.progress = Some(given);
            let book = insert_book(&conn, &input).unwrap();
            assert_eq!(book.progress, expected, "progress {} should persist as {}", given, expected);
            assert_eq!(get_book(&conn, book.id).unwrap().unwrap().progress, expected);
        }
    }

    #[test]
    fn test_list_books_ascending_id() {
        let conn = setup_test_db();
        assert!(list_books(&conn).unwrap().is_empty());

        for title in ["A", "B", "C"] {
            let mut input = dune();
            input.title = title.to_string();
            insert_book(&conn, &input).unwrap();
        }

        let books = list_books(&conn).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(
            books.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(books[0].title, "A");
        assert_eq!(books[2].title, "C");
    }

    #[test]
    fn test_get_book_not_found_is_none() {
        let conn = setup_test_db();
        assert!(get_book(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_update_progress_saturates_at_bounds() {
        let conn = setup_test_db();
        let book = insert_book(&conn, &dune()).unwrap();

        // Below the floor
        assert_eq!(update_book_progress(&conn, book.id, -10).unwrap(), 0);

        // Near the ceiling
        let mut input = dune();
        input.progress = Some(95);
        let high = insert_book(&conn, &input).unwrap();
        assert_eq!(update_book_progress(&conn, high.id, 10).unwrap(), 100);
        assert_eq!(update_book_progress(&conn, high.id, 10).unwrap(), 100);

        // Large magnitudes
        assert_eq!(update_book_progress(&conn, book.id, 1000).unwrap(), 100);
        assert_eq!(update_book_progress(&conn, book.id, -1000).unwrap(), 0);
    }

    #[test]
    fn test_update_progress_missing_id_is_not_found() {
        let conn = setup_test_db();
        match update_book_progress(&conn, 7, 10) {
            Err(BookshelfError::BookNotFound(7)) => {}
            other => panic!("expected BookNotFound(7), got {:?}", other),
        }
    }

    #[test]
    fn test_delete_twice_is_a_no_op() {
        let conn = setup_test_db();
        let book = insert_book(&conn, &dune()).unwrap();

        delete_book(&conn, book.id).unwrap();
        assert!(get_book(&conn, book.id).unwrap().is_none());

        // Second press of the delete button
        delete_book(&conn, book.id).unwrap();
    }

    #[test]
    fn test_update_book_partial_fields() {
        let conn = setup_test_db();
        let book = insert_book(&conn, &dune()).unwrap();

        let updated = update_book(
            &conn,
            book.id,
            &BookUpdate {
                title: Some("Dune Messiah".to_string()),
                progress: Some(130),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, "Herbert", "untouched field is preserved");
        assert_eq!(updated.progress, 100, "progress is clamped on update");
    }

    #[test]
    fn test_update_book_empty_update_returns_current_record() {
        let conn = setup_test_db();
        let book = insert_book(&conn, &dune()).unwrap();

        let updated = update_book(&conn, book.id, &BookUpdate::default()).unwrap();
        assert_eq!(updated, book);
    }

    #[test]
    fn test_update_book_validates_changed_text_fields() {
        let conn = setup_test_db();
        let book = insert_book(&conn, &dune()).unwrap();

        let err = update_book(
            &conn,
            book.id,
            &BookUpdate {
                title: Some("  ".to_string()),
                author: Some("".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();

        match err {
            BookshelfError::Validation(errors) => {
                assert_eq!(errors.fields.len(), 2);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }

        // Not partially applied
        let current = get_book(&conn, book.id).unwrap().unwrap();
        assert_eq!(current.title, "Dune");
        assert_eq!(current.author, "Herbert");
    }

    #[test]
    fn test_update_book_missing_id_is_not_found() {
        let conn = setup_test_db();
        match update_book(&conn, 9, &BookUpdate::default()) {
            Err(BookshelfError::BookNotFound(9)) => {}
            other => panic!("expected BookNotFound(9), got {:?}", other),
        }
    }

    #[test]
    fn test_dune_end_to_end() {
        let conn = setup_test_db();

        let book = insert_book(&conn, &dune()).unwrap();
        assert_eq!(book.id, 1);

        assert_eq!(update_book_progress(&conn, 1, 10).unwrap(), 10);
        for _ in 0..9 {
            update_book_progress(&conn, 1, 10).unwrap();
        }
        assert_eq!(get_book(&conn, 1).unwrap().unwrap().progress, 100);

        // One more step stays saturated
        assert_eq!(update_book_progress(&conn, 1, 10).unwrap(), 100);

        delete_book(&conn, 1).unwrap();
        assert!(get_book(&conn, 1).unwrap().is_none());
    }
}

//! Book store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `books` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Assigned ids come from storage; callers never pick them.
//! - Mutations that match zero rows report `NotFound` instead of
//!   succeeding silently.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use crate::model::book::{Book, BookId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author
FROM books";

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic store error for book persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target book does not exist.
    NotFound(BookId),
    /// Update was attempted on a book that was never persisted.
    MissingId,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::MissingId => write!(f, "book update requires a persisted id"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "book store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "book store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "book store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::MissingId => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for book CRUD operations.
pub trait BookStore {
    /// Inserts one book and returns the persisted row. Any id carried by
    /// the draft is ignored; storage assigns the next one.
    fn create_book(&self, draft: &Book) -> StoreResult<Book>;
    /// Gets one book by id. Absence is `Ok(None)`, not an error.
    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>>;
    /// Lists all books in ascending id order.
    fn list_books(&self) -> StoreResult<Vec<Book>>;
    /// Overwrites title and author of the row matching `book.id`.
    fn update_book(&self, book: &Book) -> StoreResult<()>;
    /// Removes one book by id. Deleting an absent id is `NotFound`.
    fn delete_book(&self, id: BookId) -> StoreResult<()>;
}

/// SQLite-backed book store.
pub struct SqliteBookStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_book_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookStore for SqliteBookStore<'_> {
    fn create_book(&self, draft: &Book) -> StoreResult<Book> {
        self.conn.execute(
            "INSERT INTO books (title, author) VALUES (?1, ?2);",
            params![draft.title.as_str(), draft.author.as_str()],
        )?;

        load_required_book(self.conn, self.conn.last_insert_rowid())
    }

    fn get_book(&self, id: BookId) -> StoreResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn list_books(&self) -> StoreResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn update_book(&self, book: &Book) -> StoreResult<()> {
        let id = book.id.ok_or(StoreError::MissingId)?;

        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2
             WHERE id = ?3;",
            params![book.title.as_str(), book.author.as_str(), id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete_book(&self, id: BookId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> StoreResult<Book> {
    Ok(Book {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        author: row.get("author")?,
    })
}

fn load_required_book(conn: &Connection, id: BookId) -> StoreResult<Book> {
    let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return parse_book_row(row);
    }
    Err(StoreError::NotFound(id))
}

fn ensure_book_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "books")? {
        return Err(StoreError::MissingRequiredTable("books"));
    }

    for column in ["id", "title", "author"] {
        if !table_has_column(conn, "books", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

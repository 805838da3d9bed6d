//! Book use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete entry points for book callers.
//! - Own the transaction boundary around every operation.
//!
//! # Invariants
//! - Every operation runs inside exactly one transaction; the transaction
//!   commits on success and rolls back on any error.
//! - Reads open deferred transactions; mutations take an immediate write
//!   lock up front.
//! - Absent ids surface as `NotFound`, never as silent success.

use crate::model::book::{Book, BookId};
use crate::store::book_store::{BookStore, SqliteBookStore, StoreError};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

/// Confirmation payload returned by successful deletes.
pub const DELETE_OK: &str = "ok";

pub type ServiceResult<T> = Result<T, BookServiceError>;

/// Service error for book use-cases.
#[derive(Debug)]
pub enum BookServiceError {
    /// Target book does not exist.
    NotFound(BookId),
    /// Persistence-layer failure.
    Store(StoreError),
    /// Shared connection lock was poisoned by a panicked holder.
    ConnectionPoisoned,
}

impl Display for BookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "book not found: {id}; check the id"),
            Self::Store(err) => write!(f, "{err}"),
            Self::ConnectionPoisoned => write!(f, "book service connection poisoned"),
        }
    }
}

impl Error for BookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
            Self::ConnectionPoisoned => None,
        }
    }
}

impl From<StoreError> for BookServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<rusqlite::Error> for BookServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(StoreError::from(value))
    }
}

/// Book service owning the shared connection and its transaction scope.
pub struct BookService {
    conn: Mutex<Connection>,
}

impl BookService {
    /// Creates a service over a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Persists a new book and returns it with the storage-assigned id.
    ///
    /// Any id carried by the draft is ignored.
    pub fn create_book(&self, draft: &Book) -> ServiceResult<Book> {
        self.write(|store| Ok(store.create_book(draft)?))
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: BookId) -> ServiceResult<Book> {
        self.read(|store| store.get_book(id)?.ok_or(BookServiceError::NotFound(id)))
    }

    /// Lists all books in ascending id order.
    pub fn list_books(&self) -> ServiceResult<Vec<Book>> {
        self.read(|store| Ok(store.list_books()?))
    }

    /// Overwrites title and author of an existing book and returns the
    /// merged row.
    ///
    /// The target row is chosen by `id` alone; any id carried by `patch`
    /// is ignored.
    pub fn update_book(&self, id: BookId, patch: &Book) -> ServiceResult<Book> {
        self.write(|store| {
            let mut book = store.get_book(id)?.ok_or(BookServiceError::NotFound(id))?;
            book.title = patch.title.clone();
            book.author = patch.author.clone();
            store.update_book(&book)?;
            Ok(book)
        })
    }

    /// Deletes one book and returns the [`DELETE_OK`] confirmation payload.
    pub fn delete_book(&self, id: BookId) -> ServiceResult<&'static str> {
        self.write(|store| {
            store.delete_book(id)?;
            Ok(DELETE_OK)
        })
    }

    fn read<T>(&self, op: impl FnOnce(&dyn BookStore) -> ServiceResult<T>) -> ServiceResult<T> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let value = op(&SqliteBookStore::try_new(&tx)?)?;
        tx.commit()?;
        Ok(value)
    }

    // Dropping `tx` without commit rolls the transaction back, so any `?`
    // inside `op` leaves storage untouched.
    fn write<T>(&self, op: impl FnOnce(&dyn BookStore) -> ServiceResult<T>) -> ServiceResult<T> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = op(&SqliteBookStore::try_new(&tx)?)?;
        tx.commit()?;
        Ok(value)
    }

    fn lock_conn(&self) -> ServiceResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BookServiceError::ConnectionPoisoned)
    }
}

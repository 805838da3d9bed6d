//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the book store.
//! - Express the persisted/transient distinction through the `id` field.
//!
//! # Invariants
//! - A persisted book has a unique, storage-assigned `id` that never changes.
//! - `id == None` means the book has not been persisted yet.
//! - `title` and `author` are stored as-is; blank values are accepted.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned by storage on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Canonical book record.
///
/// The wire shape keeps `id` nullable so transient books serialize as
/// `{"id":null,...}`; missing `title`/`author` deserialize as empty strings
/// because the service accepts and persists degenerate records unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned identity. `None` until the store persists the book.
    #[serde(default)]
    pub id: Option<BookId>,
    /// Book title. Not validated; may be blank.
    #[serde(default)]
    pub title: String,
    /// Book author. Not validated; may be blank.
    #[serde(default)]
    pub author: String,
}

impl Book {
    /// Creates a transient book that storage has not assigned an id yet.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
        }
    }

    /// Creates a book carrying a known storage identity.
    ///
    /// Used by read paths that materialize rows; callers must pass an id
    /// that actually came from storage.
    pub fn with_id(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            author: author.into(),
        }
    }

    /// Returns whether storage has assigned this book an identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn transient_book_serializes_with_null_id() {
        let book = Book::new("스프링 따라하기", "코스");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["title"], "스프링 따라하기");
        assert_eq!(json["author"], "코스");
    }

    #[test]
    fn persisted_book_serializes_with_numeric_id() {
        let book = Book::with_id(1, "a", "b");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"id":1,"title":"a","author":"b"}"#);
    }

    #[test]
    fn missing_fields_deserialize_as_defaults() {
        let book: Book = serde_json::from_str("{}").unwrap();
        assert_eq!(book.id, None);
        assert_eq!(book.title, "");
        assert_eq!(book.author, "");
        assert!(!book.is_persisted());
    }

    #[test]
    fn explicit_null_id_deserializes_as_transient() {
        let book: Book = serde_json::from_str(r#"{"id":null,"title":"t","author":"a"}"#).unwrap();
        assert!(!book.is_persisted());
        assert_eq!(book.title, "t");
    }
}

//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define the canonical data structures used by store and service layers.
//!
//! # Invariants
//! - Every persisted record is identified by a stable, storage-assigned
//!   `BookId`.

pub mod book;

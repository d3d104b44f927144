//! Repository layer for database operations

pub mod books;
pub mod borrows;

use bson::oid::ObjectId;
use mongodb::Database;

use crate::error::{AppError, AppResult};

/// Main repository struct holding per-collection repositories
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository on the given database handle
    pub fn new(db: &Database) -> Self {
        Self {
            books: books::BooksRepository::new(db),
            borrows: borrows::BorrowsRepository::new(db),
        }
    }

    /// Create the indexes the service relies on
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.books.ensure_indexes().await
    }
}

/// Parse a book id from a path segment or payload field
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::Validation(format!("Invalid book id: {}", id)))
}

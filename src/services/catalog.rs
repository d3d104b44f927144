//! Catalog service managing the book collection

use chrono::Utc;

use crate::error::AppResult;
use crate::models::book::{Book, BookQuery, CreateBook, UpdateBook};
use crate::repository::{parse_object_id, Repository};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a new book to the catalog
    pub async fn create_book(&self, payload: CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let book = Book {
            id: None,
            title: payload.title,
            author: payload.author,
            genre: payload.genre,
            isbn: payload.isbn,
            description: payload.description,
            copies: payload.copies,
            created_at: now,
            updated_at: now,
        };
        self.repository.books.create(book).await
    }

    /// List books matching the query filters
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.find(query).await
    }

    /// Get a single book by its id
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let object_id = parse_object_id(id)?;
        self.repository.books.get_by_id(object_id).await
    }

    /// Update a book's fields
    pub async fn update_book(&self, id: &str, payload: UpdateBook) -> AppResult<Book> {
        let object_id = parse_object_id(id)?;
        self.repository.books.update(object_id, &payload).await
    }

    /// Remove a book from the catalog
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;
        self.repository.books.delete(object_id).await
    }
}

//! Books repository for database operations

use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use mongodb::{
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tokio_stream::StreamExt;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookSortField, SortOrder, UpdateBook},
};

/// Collection holding book documents
pub(crate) const COLLECTION: &str = "books";

/// Default number of books returned by a list query
const DEFAULT_LIST_LIMIT: i64 = 10;
/// Hard cap on list query size
const MAX_LIST_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct BooksRepository {
    collection: Collection<Book>,
}

impl BooksRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Create the unique ISBN index
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "isbn": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    /// Insert a new book
    pub async fn create(&self, mut book: Book) -> AppResult<Book> {
        let result = self
            .collection
            .insert_one(&book)
            .await
            .map_err(map_write_error)?;

        book.id = result.inserted_id.as_object_id();
        Ok(book)
    }

    /// List books with optional genre filter, sorting and limit
    pub async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let mut filter = Document::new();
        if let Some(genre) = query.genre {
            filter.insert("genre", genre.as_str());
        }

        let sort_field = query.sort_by.unwrap_or(BookSortField::CreatedAt);
        let mut sort = Document::new();
        sort.insert(
            sort_field.as_field(),
            query.order.unwrap_or(SortOrder::Asc).direction(),
        );

        let mut cursor = self
            .collection
            .find(filter)
            .sort(sort)
            .limit(effective_limit(query.limit))
            .await?;

        let mut books = Vec::new();
        while let Some(book) = cursor.next().await {
            books.push(book?);
        }
        Ok(books)
    }

    /// Find a book by ID, returning None when absent
    pub async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id.to_hex())))
    }

    /// Apply a partial update and return the new document
    pub async fn update(&self, id: ObjectId, changes: &UpdateBook) -> AppResult<Book> {
        let update = build_update_document(changes, Utc::now());

        self.collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id.to_hex())))
    }

    /// Delete a book by ID
    pub async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                id.to_hex()
            )));
        }
        Ok(())
    }

    /// Atomically take `quantity` copies off the shelf.
    ///
    /// The filter requires `copies >= quantity`, so racing borrows can never
    /// drive the count negative. Returns the updated document, or None when
    /// the book is missing or under-stocked.
    pub async fn decrement_copies(&self, id: ObjectId, quantity: i64) -> AppResult<Option<Book>> {
        let filter = doc! { "_id": id, "copies": { "$gte": quantity } };
        let update = doc! {
            "$inc": { "copies": -quantity },
            "$set": { "updated_at": Utc::now() },
        };

        Ok(self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Put copies back on the shelf (compensation when recording a borrow
    /// fails after the decrement)
    pub async fn increment_copies(&self, id: ObjectId, quantity: i64) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$inc": { "copies": quantity },
                    "$set": { "updated_at": Utc::now() },
                },
            )
            .await?;
        Ok(())
    }
}

/// Resolve the list limit: default when absent, clamped to the allowed range
fn effective_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}

/// Build the update document for a partial update. `updated_at` is always
/// bumped, even when no other field is provided; an explicit null for
/// `description` unsets the stored field.
fn build_update_document(changes: &UpdateBook, now: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    set.insert("updated_at", now);

    if let Some(ref title) = changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(ref author) = changes.author {
        set.insert("author", author.as_str());
    }
    if let Some(genre) = changes.genre {
        set.insert("genre", genre.as_str());
    }
    if let Some(ref isbn) = changes.isbn {
        set.insert("isbn", isbn.as_str());
    }
    if let Some(copies) = changes.copies {
        set.insert("copies", copies);
    }

    let mut unset = Document::new();
    match &changes.description {
        Some(Some(description)) => {
            set.insert("description", description.as_str());
        }
        Some(None) => {
            unset.insert("description", "");
        }
        None => {}
    }

    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// Map duplicate-key write failures (unique ISBN index) to a conflict
fn map_write_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        return AppError::Conflict("A book with this ISBN already exists".to_string());
    }
    AppError::Database(err)
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

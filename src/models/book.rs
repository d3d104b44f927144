//! Book (catalog entry) model and related types.
//!
//! The `Book` struct is the persisted document shape (`books` collection);
//! API payloads and responses use the dedicated request/response types so
//! that ObjectIds and BSON datetimes never leak into the JSON surface.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book genre classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Fiction,
    NonFiction,
    Science,
    History,
    Biography,
    Fantasy,
}

impl Genre {
    /// Return the wire label for this genre
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Science => "SCIENCE",
            Genre::History => "HISTORY",
            Genre::Biography => "BIOGRAPHY",
            Genre::Fantasy => "FANTASY",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book document (persistence shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub copies: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Availability is derived, never stored: a book is available while at
    /// least one copy remains.
    pub fn is_available(&self) -> bool {
        self.copies > 0
    }
}

/// Book representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    /// Book ID (hex)
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub copies: i64,
    /// Derived flag, true while `copies > 0`
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let available = book.is_available();
        Self {
            id: book.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: book.title,
            author: book.author,
            genre: book.genre,
            isbn: book.isbn,
            description: book.description,
            copies: book.copies,
            available,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub genre: Genre,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Copies must be a positive number"))]
    pub copies: i64,
}

/// Update book request. Absent fields are left untouched; `description`
/// also accepts an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub genre: Option<Genre>,
    #[validate(length(min = 1, message = "ISBN cannot be empty"))]
    pub isbn: Option<String>,
    /// Outer None: field absent; Some(None): explicit null
    #[serde(default, with = "serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0, message = "Copies must be a positive number"))]
    pub copies: Option<i64>,
}

/// Sortable book fields for list queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookSortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
    Genre,
    Isbn,
    Copies,
}

impl BookSortField {
    /// Document field name backing this sort key
    pub fn as_field(&self) -> &'static str {
        match self {
            BookSortField::CreatedAt => "created_at",
            BookSortField::UpdatedAt => "updated_at",
            BookSortField::Title => "title",
            BookSortField::Author => "author",
            BookSortField::Genre => "genre",
            BookSortField::Isbn => "isbn",
            BookSortField::Copies => "copies",
        }
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction value
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Book list query parameters
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Filter by genre
    pub genre: Option<Genre>,
    /// Sort field (default: created_at)
    pub sort_by: Option<BookSortField>,
    /// Sort direction (default: asc)
    pub order: Option<SortOrder>,
    /// Maximum number of books to return (default: 10)
    pub limit: Option<i64>,
}

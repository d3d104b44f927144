//! Borrow record model and related types

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Borrow record document (persistence shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Borrow {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Borrowed book (`books._id`)
    pub book: ObjectId,
    pub quantity: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub due_date: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Borrow record returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowResponse {
    /// Borrow record ID (hex)
    pub id: String,
    /// Borrowed book ID (hex)
    pub book: String,
    pub quantity: i64,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Borrow> for BorrowResponse {
    fn from(borrow: Borrow) -> Self {
        Self {
            id: borrow.id.map(|id| id.to_hex()).unwrap_or_default(),
            book: borrow.book.to_hex(),
            quantity: borrow.quantity,
            due_date: borrow.due_date,
            created_at: borrow.created_at,
            updated_at: borrow.updated_at,
        }
    }
}

/// Borrow request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrow {
    /// ID of the book to borrow (hex)
    pub book: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    /// Date the copies are due back
    pub due_date: DateTime<Utc>,
}

/// Book fields surfaced in the borrowed-books summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowedBook {
    pub title: String,
    pub isbn: String,
}

/// One row of the borrowed-books summary: total quantity borrowed per book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowSummary {
    pub book: BorrowedBook,
    pub total_quantity: i64,
}

//! Borrow records repository for database operations

use bson::doc;
use mongodb::{Collection, Database};
use tokio_stream::StreamExt;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{Borrow, BorrowSummary},
};

use super::books;

/// Collection holding borrow record documents
pub(crate) const COLLECTION: &str = "borrows";

#[derive(Clone)]
pub struct BorrowsRepository {
    collection: Collection<Borrow>,
}

impl BorrowsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Insert a new borrow record
    pub async fn create(&self, mut borrow: Borrow) -> AppResult<Borrow> {
        let result = self.collection.insert_one(&borrow).await?;
        borrow.id = result.inserted_id.as_object_id();
        Ok(borrow)
    }

    /// Total quantity borrowed per book, joined with the book's title and
    /// ISBN. Records pointing at a deleted book drop out at the `$unwind`
    /// stage.
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        let pipeline = vec![
            doc! { "$group": {
                "_id": "$book",
                "total_quantity": { "$sum": "$quantity" },
            }},
            doc! { "$lookup": {
                "from": books::COLLECTION,
                "localField": "_id",
                "foreignField": "_id",
                "as": "book",
            }},
            doc! { "$unwind": "$book" },
            doc! { "$project": {
                "_id": 0,
                "book": { "title": "$book.title", "isbn": "$book.isbn" },
                "total_quantity": 1,
            }},
            doc! { "$sort": { "total_quantity": -1 } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;

        let mut rows = Vec::new();
        while let Some(document) = cursor.next().await {
            let row: BorrowSummary = bson::from_document(document?)
                .map_err(|e| AppError::Internal(format!("Malformed summary row: {}", e)))?;
            rows.push(row);
        }
        Ok(rows)
    }
}

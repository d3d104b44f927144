//! Borrow service handling stock reservation and the borrow ledger

use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::models::borrow::{Borrow, BorrowSummary, CreateBorrow};
use crate::repository::{parse_object_id, Repository};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow copies of a book, recording the loan.
    ///
    /// The stock decrement is a single conditional update, so two
    /// concurrent borrows can never take the count below zero.
    pub async fn borrow_book(&self, payload: CreateBorrow) -> AppResult<Borrow> {
        let book_id = parse_object_id(&payload.book)?;

        let reserved = self
            .repository
            .books
            .decrement_copies(book_id, payload.quantity)
            .await?;

        if reserved.is_none() {
            // The conditional update matches nothing both when the book
            // is missing and when the stock is short. Look the book up
            // once more to tell the two apart.
            return match self.repository.books.find_by_id(book_id).await? {
                Some(book) => Err(AppError::BusinessRule(format!(
                    "Not enough copies available ({} requested, {} in stock)",
                    payload.quantity, book.copies
                ))),
                None => Err(AppError::NotFound(format!(
                    "Book with id {} not found",
                    payload.book
                ))),
            };
        }

        let now = Utc::now();
        let borrow = Borrow {
            id: None,
            book: book_id,
            quantity: payload.quantity,
            due_date: payload.due_date,
            created_at: now,
            updated_at: now,
        };

        match self.repository.borrows.create(borrow).await {
            Ok(created) => Ok(created),
            Err(err) => {
                // Put the reserved copies back so the failed insert does
                // not leak stock.
                if let Err(rollback_err) = self
                    .repository
                    .books
                    .increment_copies(book_id, payload.quantity)
                    .await
                {
                    tracing::error!(
                        "Failed to restore {} copies of book {} after borrow insert error: {}",
                        payload.quantity,
                        payload.book,
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    /// Aggregate borrow totals per book, most borrowed first
    pub async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        self.repository.borrows.summary().await
    }
}

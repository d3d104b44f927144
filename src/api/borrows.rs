//! Borrow endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::borrow::{BorrowResponse, BorrowSummary, CreateBorrow},
};

/// Borrow copies of a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow recorded", body = BorrowResponse),
        (status = 400, description = "Invalid input or malformed book ID"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Not enough copies available")
    )
)]
pub async fn create_borrow(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    payload.validate()?;

    let borrow = state.services.borrows.borrow_book(payload).await?;

    Ok((StatusCode::CREATED, Json(BorrowResponse::from(borrow))))
}

/// Summarize borrowed books
///
/// Returns the total borrowed quantity per book, most borrowed first.
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    responses(
        (status = 200, description = "Borrow totals per book", body = Vec<BorrowSummary>)
    )
)]
pub async fn borrow_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowSummary>>> {
    let summary = state.services.borrows.summary().await?;

    Ok(Json(summary))
}

//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{BookQuery, BookResponse, CreateBook, UpdateBook},
};

/// List books with optional genre filter, sorting and limit
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("genre" = Option<String>, Query, description = "Filter by genre (e.g. FICTION, SCIENCE)"),
        ("sort_by" = Option<String>, Query, description = "Sort field (default: created_at)"),
        ("order" = Option<String>, Query, description = "Sort direction: asc or desc (default: asc)"),
        ("limit" = Option<i64>, Query, description = "Maximum number of books (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<BookResponse>),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.catalog.list_books(&query).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 400, description = "Malformed book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.catalog.get_book(&id).await?;

    Ok(Json(BookResponse::from(book)))
}

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "A book with this ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    payload.validate()?;

    let created = state.services.catalog.create_book(payload).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(created))))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input or malformed book ID"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "A book with this ISBN already exists")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    payload.validate()?;

    let updated = state.services.catalog.update_book(&id, payload).await?;

    Ok(Json(BookResponse::from(updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Malformed book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

//! API handlers for Lectern REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use crate::error::AppError;

/// Fallback handler for requests matching no route
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

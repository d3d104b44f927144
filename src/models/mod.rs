//! Data models for Lectern

pub mod book;
pub mod borrow;

// Re-export commonly used types
pub use book::{Book, BookQuery, BookResponse, CreateBook, Genre, UpdateBook};
pub use borrow::{Borrow, BorrowResponse, BorrowSummary, CreateBorrow};

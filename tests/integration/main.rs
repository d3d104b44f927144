//! Integration test target for the Lectern API
//!
//! These tests expect a running server (and MongoDB) and are ignored by
//! default. Run with: cargo test -- --ignored

mod api_tests;

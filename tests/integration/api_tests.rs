//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:5000/api/v1";

/// Unique 13-digit ISBN per call so repeated runs never collide
fn unique_isbn() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("978{:010}", nanos % 10_000_000_000)
}

/// Helper to create a book and return its parsed JSON body
async fn create_test_book(client: &Client, copies: i64) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "author": "Test Author",
            "genre": "FICTION",
            "isbn": unique_isbn(),
            "copies": copies
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);

    response
        .json()
        .await
        .expect("Failed to parse create response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_book() {
    let client = Client::new();

    let created = create_test_book(&client, 3).await;
    let book_id = created["id"].as_str().expect("No book ID");
    assert_eq!(created["title"], "Test Book");
    assert_eq!(created["genre"], "FICTION");
    assert_eq!(created["copies"], 3);
    assert_eq!(created["available"], true);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["isbn"], created["isbn"]);
}

#[tokio::test]
#[ignore]
async fn test_create_book_duplicate_isbn() {
    let client = Client::new();
    let isbn = unique_isbn();

    let payload = json!({
        "title": "Duplicate Test",
        "author": "Someone",
        "genre": "HISTORY",
        "isbn": isbn,
        "copies": 1
    });

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
#[ignore]
async fn test_create_book_unknown_genre() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Bad Genre",
            "author": "Someone",
            "genre": "WESTERN",
            "isbn": unique_isbn(),
            "copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    // Unknown enum values are rejected by payload deserialization
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_create_book_negative_copies() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Negative Copies",
            "author": "Someone",
            "genre": "SCIENCE",
            "isbn": unique_isbn(),
            "copies": -1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_list_books_filter_and_limit() {
    let client = Client::new();
    create_test_book(&client, 1).await;
    create_test_book(&client, 2).await;

    let response = client
        .get(format!("{}/books?genre=FICTION&limit=2", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array of books");
    assert!(books.len() <= 2);
    for book in books {
        assert_eq!(book["genre"], "FICTION");
    }
}

#[tokio::test]
#[ignore]
async fn test_list_books_sorted_by_copies() {
    let client = Client::new();
    create_test_book(&client, 1).await;
    create_test_book(&client, 2).await;

    let response = client
        .get(format!("{}/books?sort_by=copies&order=desc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array of books");
    let copies: Vec<i64> = books
        .iter()
        .map(|book| book["copies"].as_i64().expect("No copies field"))
        .collect();
    let mut sorted = copies.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(copies, sorted);
}

#[tokio::test]
#[ignore]
async fn test_list_books_limit_bounds() {
    let client = Client::new();
    create_test_book(&client, 1).await;
    create_test_book(&client, 1).await;

    // A zero limit is raised to one book, not treated as unlimited
    let response = client
        .get(format!("{}/books?limit=0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array of books");
    assert_eq!(books.len(), 1);

    // Oversized limits are capped
    let response = client
        .get(format!("{}/books?limit=500", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array of books");
    assert!(books.len() <= 100);
}

#[tokio::test]
#[ignore]
async fn test_get_book_malformed_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/not-a-valid-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_get_book_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/ffffffffffffffffffffffff", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
#[ignore]
async fn test_update_book() {
    let client = Client::new();

    let created = create_test_book(&client, 1).await;
    let book_id = created["id"].as_str().expect("No book ID");

    // Partial update: title only
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "title": "Renamed" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["author"], "Test Author");

    // Dropping copies to zero flips the derived availability
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "copies": 0 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["copies"], 0);
    assert_eq!(body["available"], false);

    // An explicit null clears the description; an absent field does not
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "description": "Signed first edition" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["description"], "Signed first edition");

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "title": "Renamed again" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["description"], "Signed first edition");

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "description": null }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["description"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();

    let created = create_test_book(&client, 1).await;
    let book_id = created["id"].as_str().expect("No book ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_flow() {
    let client = Client::new();

    let created = create_test_book(&client, 5).await;
    let book_id = created["id"].as_str().expect("No book ID");
    let isbn = created["isbn"].as_str().expect("No ISBN");

    // Borrow two copies
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book": book_id,
            "quantity": 2,
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"], book_id);
    assert_eq!(body["quantity"], 2);

    // Stock dropped from 5 to 3
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["copies"], 3);
    assert_eq!(body["available"], true);

    // Asking for more than the remaining stock is refused
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book": book_id,
            "quantity": 10,
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NotEnoughCopies");

    // Borrowing the exact remainder drains the stock and flips availability
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book": book_id,
            "quantity": 3,
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["copies"], 0);
    assert_eq!(body["available"], false);

    // The summary reports the borrowed total for this book
    let response = client
        .get(format!("{}/borrows", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let rows = body.as_array().expect("Expected a summary array");
    let row = rows
        .iter()
        .find(|row| row["book"]["isbn"] == isbn)
        .expect("Borrowed book missing from summary");
    assert_eq!(row["total_quantity"], 5);
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book": "ffffffffffffffffffffffff",
            "quantity": 1,
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_zero_quantity() {
    let client = Client::new();

    let created = create_test_book(&client, 1).await;
    let book_id = created["id"].as_str().expect("No book ID");

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book": book_id,
            "quantity": 0,
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_route_returns_json_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/nope", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchBook");
    assert_eq!(body["message"], "Route not found");
}

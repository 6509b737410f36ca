#![allow(missing_docs)]

use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde_json::Value;

use crate::{AppState, build_router, stores::sqlite::SQLiteCategoryStore};

/// Create a test server backed by an in-memory SQLite store.
///
/// The store is returned as well so tests can check what was persisted.
pub(crate) fn get_test_server() -> (TestServer, SQLiteCategoryStore) {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let store = SQLiteCategoryStore::new(connection).expect("Could not create category store");
    let app = build_router(AppState::new(store.clone()));

    let server = TestServer::new(app);

    (server, store)
}

/// Assert that the response body has the shape `{"message": "...", "status": false}`.
#[track_caller]
pub(crate) fn assert_error_body(response: &TestResponse) {
    let body = response.json::<Value>();

    assert_eq!(body["status"], Value::Bool(false), "body: {body}");
    assert!(
        body["message"].as_str().is_some_and(|message| !message.is_empty()),
        "expected a non-empty message, got body: {body}"
    );
}

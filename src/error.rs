//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::{BatchResponse, MessageResponse};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent from the request body, was empty, or the
    /// body could not be read as JSON at all.
    #[error("Missing payload: \"{0}\" is required")]
    MissingPayload(String),

    /// The request body was valid JSON but a field had the wrong type, e.g.,
    /// a list where a single string is expected.
    #[error("Invalid payload: {0}")]
    WrongType(String),

    /// A category with the same normalized name already exists.
    #[error("Category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// No category matched the requested name or ID.
    #[error("Category \"{0}\" not found")]
    CategoryNotFound(String),

    /// The category exists but does not contain the requested subcategory.
    #[error("Subcategory \"{sub_category}\" not found in category \"{category}\"")]
    SubcategoryNotFound {
        /// The normalized name of the parent category.
        category: String,
        /// The normalized subcategory that was not found.
        sub_category: String,
    },

    /// Some entries of a batch subcategory removal were not present in the
    /// category.
    ///
    /// The entries in `success` were removed and are not rolled back.
    #[error("Could not remove subcategories: {}", .failure.join(", "))]
    PartialFailure {
        /// The subcategories that were removed.
        success: Vec<String>,
        /// The subcategories that were not present.
        failure: Vec<String>,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An unexpected error reported by the MongoDB driver, including writes
    /// the server did not acknowledge.
    ///
    /// The error string should only be logged on the server.
    #[error("an unexpected database error occurred: {0}")]
    DatabaseError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The server configuration is incomplete or invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The document store could not be reached at startup.
    #[error("could not connect to the document store: {0}")]
    StoreUnreachable(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(value: mongodb::error::Error) -> Self {
        tracing::error!("an unhandled MongoDB error occurred: {}", value);
        Error::DatabaseError(value.to_string())
    }
}

impl Error {
    /// The HTTP status code the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingPayload(_) | Error::WrongType(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateCategory(_) => StatusCode::CONFLICT,
            Error::CategoryNotFound(_) | Error::SubcategoryNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Error::PartialFailure { .. } => StatusCode::MULTI_STATUS,
            Error::SqlError(_)
            | Error::DatabaseError(_)
            | Error::DatabaseLockError
            | Error::InvalidConfig(_)
            | Error::StoreUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let message = self.to_string();

        match self {
            Error::PartialFailure { success, failure } => (
                status_code,
                Json(BatchResponse {
                    message,
                    status: false,
                    success,
                    failure,
                }),
            )
                .into_response(),
            // Internal errors are not intended to be shown to the client.
            _ if status_code == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {message}");

                (
                    status_code,
                    Json(MessageResponse::failure(
                        "An unexpected error occurred, check the server logs for more details.",
                    )),
                )
                    .into_response()
            }
            _ => (status_code, Json(MessageResponse::failure(message))).into_response(),
        }
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::Error;

    async fn into_json(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        (
            status,
            serde_json::from_slice(&body).expect("Could not parse response body as JSON"),
        )
    }

    #[tokio::test]
    async fn missing_payload_is_bad_request() {
        let (status, body) = into_json(Error::MissingPayload("category".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"message": "Missing payload: \"category\" is required", "status": false})
        );
    }

    #[tokio::test]
    async fn duplicate_category_is_conflict() {
        let (status, body) = into_json(Error::DuplicateCategory("Fashion".to_owned())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], json!(false));
    }

    #[tokio::test]
    async fn partial_failure_lists_both_outcomes() {
        let error = Error::PartialFailure {
            success: vec!["A".to_owned()],
            failure: vec!["C".to_owned()],
        };

        let (status, body) = into_json(error).await;

        assert_eq!(status, StatusCode::MULTI_STATUS);
        assert_eq!(body["success"], json!(["A"]));
        assert_eq!(body["failure"], json!(["C"]));
        assert_eq!(body["status"], json!(false));
        assert_eq!(body["message"], json!("Could not remove subcategories: C"));
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = into_json(Error::DatabaseError("secret detail".to_owned())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("secret detail"));
    }
}

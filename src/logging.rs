//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::response::MessageResponse;

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body that is read, matching axum's default body limit.
pub const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body for {}: {error}", parts.uri);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                axum::Json(MessageResponse::failure(format!(
                    "Could not read request body, the limit is {REQUEST_BODY_LIMIT} bytes"
                ))),
            )
                .into_response();
        }
    };

    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Cut `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a
/// character.
fn truncate(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    Some(&body[..end])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate(body) {
        Some(head) => {
            tracing::info!(
                "Received request: {} {}\nbody: {head}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => {
            tracing::info!(
                "Received request: {} {}\nbody: {body:?}",
                parts.method,
                parts.uri
            );
        }
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate(body) {
        Some(head) => {
            tracing::info!("Sending response: {}\nbody: {head}...", parts.status);
            tracing::debug!("Full response body: {body:?}");
        }
        None => {
            tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LOG_BODY_LENGTH_LIMIT, truncate};

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate("{\"category\":\"Fashion\"}"), None);
    }

    #[test]
    fn long_body_is_cut_at_limit() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT + 10);

        assert_eq!(truncate(&body).map(str::len), Some(LOG_BODY_LENGTH_LIMIT));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1), "b".repeat(8));

        let head = truncate(&body).unwrap();

        assert_eq!(head.len(), LOG_BODY_LENGTH_LIMIT - 1);
    }
}

#[cfg(test)]
mod logging_middleware_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints,
        stores::CategoryStore,
        test_utils::{assert_error_body, get_test_server},
    };

    use super::REQUEST_BODY_LIMIT;

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let (server, store) = get_test_server();

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "a".repeat(REQUEST_BODY_LIMIT + 1)}))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_error_body(&response);
        assert_eq!(store.list_all().await, Ok(vec![]));
    }

    #[tokio::test]
    async fn request_body_is_passed_on_to_handler() {
        let (server, store) = get_test_server();

        server
            .post(endpoints::CATEGORIES)
            .json(&json!({"category": "fashion"}))
            .await
            .assert_status(StatusCode::CREATED);

        assert!(store.find_by_name("Fashion").await.unwrap().is_some());
    }
}

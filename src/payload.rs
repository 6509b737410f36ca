//! An extractor for JSON request bodies that reports rejections with the
//! app's JSON error contract.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::Error;

/// A JSON request body deserialized into `T`.
///
/// Bodies that are missing, are not JSON or are sent without a JSON content
/// type are rejected with [Error::MissingPayload]. Bodies that are valid JSON
/// but do not fit `T` are rejected with [Error::WrongType].
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request payload: {}", rejection.body_text());
                Err(rejection_to_error(rejection))
            }
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> Error {
    match rejection {
        JsonRejection::JsonDataError(error) => Error::WrongType(error.body_text()),
        _ => Error::MissingPayload("request body".to_owned()),
    }
}

/// Return the trimmed `value` of `field`, or [Error::MissingPayload] if it is
/// absent or blank.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, Error> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err(Error::MissingPayload(field.to_owned())),
    }
}

#[cfg(test)]
mod payload_tests {
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{Request, header::CONTENT_TYPE},
    };
    use serde::Deserialize;

    use crate::Error;

    use super::{Payload, require_text};

    #[derive(Debug, Deserialize)]
    struct Data {
        #[allow(dead_code)]
        sub_category: Option<String>,
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_matching_body() {
        let result = Payload::<Data>::from_request(json_request(r#"{"sub_category": "A"}"#), &())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejects_wrong_type_with_wrong_type_error() {
        let result =
            Payload::<Data>::from_request(json_request(r#"{"sub_category": ["A"]}"#), &()).await;

        assert!(matches!(result, Err(Error::WrongType(_))));
    }

    #[tokio::test]
    async fn rejects_invalid_json_with_missing_payload() {
        let result = Payload::<Data>::from_request(json_request("{not json"), &()).await;

        assert!(matches!(result, Err(Error::MissingPayload(_))));
    }

    #[tokio::test]
    async fn rejects_missing_content_type_with_missing_payload() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"sub_category": "A"}"#))
            .unwrap();

        let result = Payload::<Data>::from_request(request, &()).await;

        assert!(matches!(result, Err(Error::MissingPayload(_))));
    }

    #[test]
    fn require_text_trims_value() {
        assert_eq!(require_text("category", Some("  Foo ")), Ok("Foo".to_owned()));
    }

    #[test]
    fn require_text_rejects_blank_and_absent_values() {
        let want = Err(Error::MissingPayload("category".to_owned()));

        assert_eq!(require_text("category", None), want);
        assert_eq!(require_text("category", Some(" \t")), want);
    }
}

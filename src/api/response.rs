//
//  livechat-api
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Decoding
//!
//! Every response goes through the same single-pass classification:
//!
//! | Status | Body | Outcome |
//! |--------|------|---------|
//! | 200 | matches output type | [`ResponseOutcome::Success`] |
//! | 200 | does not match | [`Error::Decode`] |
//! | other | `{"error": {code, message}}` with a message | [`ResponseOutcome::Api`] |
//! | other | anything else | [`ResponseOutcome::Unrecognized`] |
//!
//! A failure while reading the body is a transport error, not a decode error.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::common::{ApiError, Error, ErrorEnvelope};

/// Result of classifying a complete response.
///
/// # Example
///
/// ```rust
/// use livechat_api::api::ResponseOutcome;
/// use reqwest::StatusCode;
///
/// let body = br#"{"error":{"code":"not_found","message":"Bot not found"}}"#;
/// let outcome = ResponseOutcome::<serde_json::Value>::classify(StatusCode::NOT_FOUND, body).unwrap();
///
/// match outcome {
///     ResponseOutcome::Api(err) => assert_eq!(err.code, "not_found"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// ```
#[derive(Debug)]
pub enum ResponseOutcome<T> {
    /// HTTP 200 with a body of the expected shape.
    Success(T),

    /// Non-200 with a structured error carrying a message.
    Api(ApiError),

    /// Non-200 whose body is not a usable structured error.
    Unrecognized {
        status: StatusCode,
        body: String,
        /// Parser message when the body was not valid error JSON at all.
        reason: Option<String>,
    },
}

impl<T: DeserializeOwned> ResponseOutcome<T> {
    /// Classifies a status and a fully read body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] only when the status is 200 and the body does
    /// not deserialize into `T`. Every non-200 response yields an outcome.
    pub fn classify(status: StatusCode, body: &[u8]) -> Result<Self, Error> {
        if status == StatusCode::OK {
            return serde_json::from_slice(body)
                .map(Self::Success)
                .map_err(Error::Decode);
        }

        let raw = || String::from_utf8_lossy(body).into_owned();
        Ok(match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => Self::Api(envelope.error),
            Ok(_) => Self::Unrecognized {
                status,
                body: raw(),
                reason: None,
            },
            Err(err) => Self::Unrecognized {
                status,
                body: raw(),
                reason: Some(err.to_string()),
            },
        })
    }
}

impl<T> ResponseOutcome<T> {
    /// Folds the outcome into the dispatcher's `Result`.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Api(err) => Err(Error::Api(err)),
            Self::Unrecognized {
                status,
                body,
                reason,
            } => Err(Error::UnexpectedResponse {
                status: status.as_u16(),
                body,
                reason,
            }),
        }
    }
}

/// Drains `response` and decodes it into `T`.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    let body = response.bytes().await?;
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

    ResponseOutcome::classify(status, &body)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Bot {
        id: String,
    }

    fn classify(status: u16, body: &str) -> Result<Bot, Error> {
        let status = StatusCode::from_u16(status).unwrap();
        ResponseOutcome::<Bot>::classify(status, body.as_bytes())?.into_result()
    }

    #[test]
    fn test_success_decodes_body() {
        assert_eq!(classify(200, r#"{"id":"b1"}"#).unwrap(), Bot { id: "b1".into() });
    }

    #[test]
    fn test_success_shape_mismatch_is_decode_error() {
        let err = classify(200, r#"{"name":"b1"}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_structured_error_is_preserved() {
        let err = classify(400, r#"{"error":{"code":"invalid_request","message":"bad payload"}}"#)
            .unwrap_err();
        let api = err.as_api_error().unwrap();
        assert_eq!(api.code, "invalid_request");
        assert_eq!(api.message, "bad payload");
    }

    #[test]
    fn test_empty_message_is_synthesized() {
        let err = classify(409, r#"{"error":{"code":"conflict","message":""}}"#).unwrap_err();
        match err {
            Error::UnexpectedResponse { status, body, reason } => {
                assert_eq!(status, 409);
                assert!(body.contains("conflict"));
                assert!(reason.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_is_synthesized() {
        let err = classify(500, "").unwrap_err();
        let text = err.to_string();
        assert!(matches!(err, Error::UnexpectedResponse { status: 500, .. }));
        assert!(text.contains("500"));
        assert!(text.contains("raw body: )"));
    }

    #[test]
    fn test_non_json_body_is_kept_verbatim() {
        let err = classify(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(err.to_string().contains("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_non_200_success_status_is_an_error() {
        // Only 200 counts as success.
        let err = classify(201, r#"{"id":"b1"}"#).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { status: 201, .. }));
    }
}

//
//  livechat-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error Types Shared by the Dispatcher and the Upload Client
//!
//! Every failure is returned to the immediate caller as an [`Error`]. Nothing
//! is retried, logged or swallowed along the way: the dispatcher surfaces the
//! most specific error it can build and leaves the decision to the caller.
//!
//! # Overview
//!
//! - [`Error`] - One variant per failure the core can produce
//! - [`ErrorKind`] - Coarse classification of [`Error`] for exhaustive matching
//! - [`ApiError`] - The structured `{code, message}` error returned by the service
//!
//! # Example
//!
//! ```rust
//! use livechat_api::api::{ApiError, Error, ErrorKind};
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::Configuration => "fix the client setup",
//!         ErrorKind::RequestBuild => "fix the request",
//!         ErrorKind::Authentication => "provide a valid token",
//!         ErrorKind::Transport => "check connectivity",
//!         ErrorKind::Remote => "the service rejected the action",
//!         ErrorKind::Decode => "the response had an unexpected shape",
//!     }
//! }
//!
//! let err = Error::Api(ApiError::new("validation", "bad payload"));
//! assert_eq!(describe(&err), "the service rejected the action");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for every dispatcher operation.
///
/// # Variants
///
/// | Variant | Kind | Raised |
/// |---------|------|--------|
/// | `MissingTokenSource` | Configuration | at construction |
/// | `Encode` | RequestBuild | before I/O |
/// | `Multipart` | RequestBuild | before I/O |
/// | `RequestBuild` | RequestBuild | before I/O |
/// | `InvalidHeader` | RequestBuild | when setting a custom header |
/// | `TokenUnavailable` | Authentication | before I/O |
/// | `UnsupportedTokenType` | Authentication | before I/O |
/// | `Transport` | Transport | sending or reading the body |
/// | `Api` | Remote | non-200 with a structured body |
/// | `UnexpectedResponse` | Remote | non-200 without a usable body |
/// | `Decode` | Decode | 200 with a body of the wrong shape |
///
/// # Notes
///
/// - `Transport` converts from `reqwest::Error` so `?` can be used on `send()`
/// - `Api` keeps the code and message sent by the service verbatim
#[derive(Error, Debug)]
pub enum Error {
    /// The dispatcher was built without a token source.
    #[error("cannot initialize api without a token source")]
    MissingTokenSource,

    /// The request payload could not be serialized to JSON.
    #[error("couldn't encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The multipart envelope for a file upload could not be built.
    #[error("couldn't build multipart body: {0}")]
    Multipart(String),

    /// The request generator failed or produced a request that could not
    /// carry the required headers.
    #[error("couldn't create new http request: {0}")]
    RequestBuild(String),

    /// A custom header name or value is not valid HTTP.
    #[error("invalid custom header {name:?}: {reason}")]
    InvalidHeader {
        /// The header name as supplied by the caller.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The token source had no credential to offer.
    #[error("couldn't get token")]
    TokenUnavailable,

    /// The token declared a scheme other than Bearer or Basic.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// The request could not be sent or its body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a structured error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service answered with a non-200 status whose body was not a
    /// usable structured error.
    #[error(
        "couldn't unmarshal error response{} (code: {status}, raw body: {body})",
        .reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default()
    )]
    UnexpectedResponse {
        /// Raw HTTP status code.
        status: u16,
        /// Raw response body, lossily decoded as UTF-8.
        body: String,
        /// Parser message when the body was not valid error JSON.
        reason: Option<String>,
    },

    /// A 200 response body did not match the expected output shape.
    #[error("couldn't decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The client itself is misconfigured.
    Configuration,
    /// The request could not be assembled.
    RequestBuild,
    /// No usable credential.
    Authentication,
    /// Network-level failure.
    Transport,
    /// The service reported a failure.
    Remote,
    /// A successful response could not be decoded.
    Decode,
}

impl Error {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTokenSource => ErrorKind::Configuration,
            Self::Encode(_)
            | Self::Multipart(_)
            | Self::RequestBuild(_)
            | Self::InvalidHeader { .. } => ErrorKind::RequestBuild,
            Self::TokenUnavailable | Self::UnsupportedTokenType(_) => ErrorKind::Authentication,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api(_) | Self::UnexpectedResponse { .. } => ErrorKind::Remote,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Returns the structured service error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status of a non-200 response that could not be
    /// decoded into an [`ApiError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Structured error returned by the service on a non-200 response.
///
/// On the wire it is nested under an `error` key:
///
/// ```json
/// {"error": {"code": "validation", "message": "Request object is invalid"}}
/// ```
///
/// Older endpoints send `type` instead of `code`; both are accepted.
///
/// # Example
///
/// ```rust
/// use livechat_api::api::ApiError;
///
/// let err = ApiError::new("not_found", "Chat not found");
/// assert_eq!(err.to_string(), "API error: not_found - Chat not found");
/// ```
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[error("API error: {code} - {message}")]
pub struct ApiError {
    /// Machine-readable error code.
    #[serde(default, alias = "type")]
    pub code: String,

    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Body of a non-200 response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error: ApiError,
}

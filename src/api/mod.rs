//
//  livechat-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the request-dispatch engine shared by every LiveChat
//! service client.
//!
//! ## Architecture
//!
//! - [`client`]: The [`Api`] dispatcher and its [`ApiBuilder`]
//! - [`generator`]: The [`RequestGenerator`] strategy that shapes action URLs
//! - [`response`]: Classification of responses into success or error
//! - [`upload`]: [`FileUploadApi`], the dispatcher plus multipart uploads
//! - [`common`]: The [`Error`] taxonomy and the structured [`ApiError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use livechat_api::api::{Api, DefaultRequestGenerator};
//! use livechat_api::auth::{StaticToken, Token};
//! use serde_json::{json, Value};
//!
//! # async fn example() -> Result<(), livechat_api::api::Error> {
//! let api = Api::builder()
//!     .token_source(StaticToken::new(Token::bearer("access-token", "dal")))
//!     .client_id("my-client-id")
//!     .request_generator(DefaultRequestGenerator::new("configuration"))
//!     .build()?;
//!
//! let groups: Value = api.call("list_groups", &json!({"fields": ["agent_priorities"]})).await?;
//! println!("{groups:#}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as [`Error`] variants. [`Error::kind`] groups them:
//!
//! - `Configuration`: no token source
//! - `RequestBuild`: payload, generator or header problems
//! - `Authentication`: no token, or an unsupported scheme
//! - `Transport`: network failures
//! - `Remote`: non-200 responses
//! - `Decode`: a 200 body of the wrong shape

pub mod client;
pub mod common;
pub mod generator;
pub mod response;
pub mod upload;

pub use client::{Api, ApiBuilder, DEFAULT_HOST, DEFAULT_SERVICE, DEFAULT_TIMEOUT, USER_AGENT_TAG};
pub use common::{ApiError, Error, ErrorKind};
pub use generator::{DefaultRequestGenerator, GeneratorError, RequestGenerator, API_VERSION};
pub use response::ResponseOutcome;
pub use upload::{FileUploadApi, UPLOAD_FILE_ACTION};

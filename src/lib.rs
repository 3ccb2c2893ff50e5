//
//  livechat-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # LiveChat API Client Library
//!
//! The request-dispatch engine behind the LiveChat service clients: token
//! injection, pluggable action URLs, custom headers, multipart file uploads
//! and decoding of success and error responses.
//!
//! ## Overview
//!
//! Every remote operation is an *action* posted as JSON to
//! `<host>/v<version>/<service>/action/<action>`. [`Api::call`] handles the
//! whole round trip for any serializable request and deserializable response;
//! it does not know or care what a particular action does.
//!
//! ## Module Structure
//!
//! - [`api`]: The dispatcher, request generators, response decoding and uploads
//! - [`auth`]: Tokens and token sources
//! - [`config`]: TOML configuration for building a dispatcher
//! - [`cli`]: Command-line interface definitions for the `lcapi` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use livechat_api::{Api, StaticToken, Token};
//! use serde_json::{json, Value};
//!
//! # async fn example() -> Result<(), livechat_api::Error> {
//! let api = Api::builder()
//!     .token_source(StaticToken::new(Token::bearer("access-token", "dal")))
//!     .client_id("my-client-id")
//!     .build()?;
//!
//! let bots: Value = api.call("list_bots", &json!({"all": true})).await?;
//! println!("{bots:#}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// The request-dispatch engine.
///
/// Provides the [`Api`] dispatcher, the [`RequestGenerator`](api::RequestGenerator)
/// strategy, response classification and [`FileUploadApi`].
pub mod api;

/// Tokens and token sources.
pub mod auth;

/// Configuration file management.
pub mod config;

pub use api::{Api, ApiBuilder, ApiError, Error, ErrorKind, FileUploadApi};
pub use auth::{StaticToken, Token, TokenSource, TokenType};
pub use config::ApiConfig;

/// Application name, used for the configuration directory.
pub const APP_NAME: &str = "lcapi";

/// Library version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the `lcapi` binary.
///
/// # Example
///
/// ```rust,no_run
/// use livechat_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// No token, or a token with an unsupported scheme.
    pub const AUTH_ERROR: i32 = 4;

    /// The service rejected the action.
    pub const API_ERROR: i32 = 8;

    /// The service could not be reached.
    pub const NETWORK_ERROR: i32 = 32;
}

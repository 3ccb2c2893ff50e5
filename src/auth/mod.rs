//
//  livechat-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials are supplied to the dispatcher through a [`TokenSource`]. The
//! dispatcher asks for a token on every call and never caches, refreshes or
//! stores it, so the source is free to rotate credentials between calls.
//!
//! ## Supported Schemes
//!
//! - **Bearer**: OAuth access tokens.
//! - **Basic**: base64-encoded `account:secret` pairs (personal access tokens).
//!
//! Tokens declaring any other scheme are rejected before a request is sent.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use livechat_api::auth::{StaticToken, Token, TokenSource};
//!
//! // A fixed credential
//! let fixed: Arc<dyn TokenSource> = Arc::new(StaticToken::new(Token::bearer("abc", "dal")));
//! assert!(fixed.token().is_some());
//!
//! // Any closure works as well
//! let dynamic: Arc<dyn TokenSource> = Arc::new(|| Some(Token::bearer("rotated", "dal")));
//! assert_eq!(dynamic.token().unwrap().access_token, "rotated");
//! ```

mod token;

pub use token::*;

/// Supplies the current credential on demand.
///
/// Implementations own the credential's lifecycle. Returning `None` makes the
/// pending call fail with [`Error::TokenUnavailable`](crate::api::Error::TokenUnavailable)
/// without any network I/O.
///
/// The trait is implemented for every `Fn() -> Option<Token> + Send + Sync`
/// closure, so a plain function can be passed wherever a source is expected.
pub trait TokenSource: Send + Sync {
    /// Returns the credential to use for the next request, if one is available.
    fn token(&self) -> Option<Token>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<Token> + Send + Sync,
{
    fn token(&self) -> Option<Token> {
        self()
    }
}

/// A [`TokenSource`] that always returns the same credential.
///
/// Useful for scripts and tests where the token does not expire during the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct StaticToken(Token);

impl StaticToken {
    pub fn new(token: Token) -> Self {
        Self(token)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<Token> {
        Some(self.0.clone())
    }
}

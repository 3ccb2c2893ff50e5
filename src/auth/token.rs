//
//  livechat-api
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Access Tokens
//!
//! This module defines the credential handed to the dispatcher on every call.
//! A [`Token`] is read, never mutated: issuing, refreshing and persisting it is
//! the job of whatever [`TokenSource`](super::TokenSource) produced it.
//!
//! ## Example
//!
//! ```rust
//! use livechat_api::auth::{Token, TokenType};
//!
//! let token = Token::bearer("dal:abc123", "dal");
//! assert_eq!(token.token_type, TokenType::Bearer);
//! assert_eq!(token.authorization(), "Bearer dal:abc123");
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Authorization scheme of a [`Token`].
///
/// Only [`TokenType::Bearer`] and [`TokenType::Basic`] are accepted by the
/// dispatcher. Any other scheme is kept verbatim in [`TokenType::Other`] so it
/// can be reported back to the caller when the call is rejected.
///
/// # Serialization
///
/// The scheme is serialized as its plain name (`"Bearer"`, `"Basic"`, ...).
///
/// ```rust
/// use livechat_api::auth::TokenType;
///
/// let parsed: TokenType = serde_json::from_str("\"Basic\"").unwrap();
/// assert_eq!(parsed, TokenType::Basic);
///
/// let unknown: TokenType = serde_json::from_str("\"Digest\"").unwrap();
/// assert_eq!(unknown, TokenType::Other("Digest".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    /// `Authorization: Bearer <access token>`
    Bearer,
    /// `Authorization: Basic <access token>`
    Basic,
    /// Any scheme the dispatcher does not support.
    Other(String),
}

impl TokenType {
    /// Returns the scheme name as it appears in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bearer => "Bearer",
            Self::Basic => "Basic",
            Self::Other(scheme) => scheme,
        }
    }

    /// Returns `true` for the schemes the dispatcher is allowed to send.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Bearer | Self::Basic)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TokenType {
    fn from(scheme: String) -> Self {
        match scheme.as_str() {
            "Bearer" => Self::Bearer,
            "Basic" => Self::Basic,
            _ => Self::Other(scheme),
        }
    }
}

impl From<&str> for TokenType {
    fn from(scheme: &str) -> Self {
        Self::from(scheme.to_string())
    }
}

impl From<TokenType> for String {
    fn from(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Other(scheme) => scheme,
            known => known.as_str().to_string(),
        }
    }
}

/// A credential used to authorize a single API call.
///
/// # Fields
///
/// - `token_type`: The authorization scheme.
/// - `access_token`: The credential value placed after the scheme name.
/// - `region`: Data-center region, sent as `X-Region`.
///
/// # Example
///
/// ```rust
/// use livechat_api::auth::Token;
///
/// let token = Token::basic_from_credentials("account-id", "personal-access-token", "fra");
/// assert!(token.authorization().starts_with("Basic "));
/// assert_eq!(token.region, "fra");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The authorization scheme.
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// The credential value.
    ///
    /// For Basic tokens this is already base64-encoded.
    pub access_token: String,

    /// Region the credential belongs to.
    #[serde(default)]
    pub region: String,
}

impl Token {
    /// Creates a token with an explicit scheme.
    pub fn new(
        token_type: impl Into<TokenType>,
        access_token: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
            region: region.into(),
        }
    }

    /// Creates a Bearer token.
    pub fn bearer(access_token: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(TokenType::Bearer, access_token, region)
    }

    /// Creates a Basic token from an already encoded credential.
    pub fn basic(access_token: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(TokenType::Basic, access_token, region)
    }

    /// Creates a Basic token from an account identifier and a secret.
    ///
    /// The pair is joined as `account:secret` and base64-encoded, which is the
    /// form expected after `Basic ` in the `Authorization` header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use livechat_api::auth::Token;
    ///
    /// let token = Token::basic_from_credentials("user", "pass", "dal");
    /// assert_eq!(token.access_token, "dXNlcjpwYXNz");
    /// ```
    pub fn basic_from_credentials(account: &str, secret: &str, region: impl Into<String>) -> Self {
        let encoded = STANDARD.encode(format!("{account}:{secret}"));
        Self::basic(encoded, region)
    }

    /// Formats the `Authorization` header value using this token's own scheme.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Formats the `Authorization` header value with the Bearer scheme,
    /// whatever this token's declared scheme is.
    pub fn bearer_authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

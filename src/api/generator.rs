//
//  livechat-api
//  api/generator.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Generators
//!
//! A [`RequestGenerator`] turns `(token, host, action)` into the bare request
//! the dispatcher then decorates with a body and headers. It is the only
//! piece that varies between clients for different backend services, so each
//! service client supplies its own generator and reuses [`Api`](super::Api)
//! unchanged.
//!
//! Generators must not perform I/O. The default one ignores the token.
//!
//! ## Example
//!
//! ```rust
//! use livechat_api::api::{DefaultRequestGenerator, RequestGenerator};
//! use livechat_api::auth::Token;
//!
//! let generator = DefaultRequestGenerator::new("configuration");
//! let token = Token::bearer("abc", "dal");
//! let request = generator
//!     .generate(&token, "https://api.livechatinc.com", "list_bots")
//!     .unwrap();
//!
//! assert_eq!(request.method(), "POST");
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.livechatinc.com/v3.3/configuration/action/list_bots"
//! );
//! ```

use reqwest::{Method, Request};
use url::Url;

use crate::auth::Token;

/// API version used by [`DefaultRequestGenerator`].
pub const API_VERSION: &str = "3.3";

/// Error returned by a [`RequestGenerator`].
///
/// The dispatcher wraps it in [`Error::RequestBuild`](super::Error::RequestBuild).
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// Builds the base request for an action.
///
/// The returned request carries a method and URL only; the dispatcher sets the
/// body and every header afterwards.
///
/// Any `Fn(&Token, &str, &str) -> Result<Request, GeneratorError>` closure that
/// is `Send + Sync` implements this trait.
///
/// # Example
///
/// ```rust
/// use livechat_api::api::{GeneratorError, RequestGenerator};
/// use livechat_api::auth::Token;
/// use reqwest::{Method, Request};
///
/// // A service that exposes actions as flat paths
/// let flat = |_: &Token, host: &str, action: &str| -> Result<Request, GeneratorError> {
///     let url: reqwest::Url = format!("{host}/{action}").parse()?;
///     Ok(Request::new(Method::POST, url))
/// };
///
/// let request = flat
///     .generate(&Token::bearer("t", ""), "https://example.com", "ping")
///     .unwrap();
/// assert_eq!(request.url().path(), "/ping");
/// ```
pub trait RequestGenerator: Send + Sync {
    fn generate(&self, token: &Token, host: &str, action: &str) -> Result<Request, GeneratorError>;
}

impl<F> RequestGenerator for F
where
    F: Fn(&Token, &str, &str) -> Result<Request, GeneratorError> + Send + Sync,
{
    fn generate(&self, token: &Token, host: &str, action: &str) -> Result<Request, GeneratorError> {
        self(token, host, action)
    }
}

/// Generates `POST <host>/v<version>/<service>/action/<action>` requests.
///
/// # Fields
///
/// - `service`: The backend service segment, e.g. `configuration` or `agent`.
/// - `version`: The API version segment, [`API_VERSION`] unless overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRequestGenerator {
    service: String,
    version: String,
}

impl DefaultRequestGenerator {
    /// Creates a generator for `service` at the stable API version.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: API_VERSION.to_string(),
        }
    }

    /// Targets a different API version, e.g. a developer preview.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Formats the action URL for `host`.
    ///
    /// A trailing slash on `host` is ignored.
    pub fn action_url(&self, host: &str, action: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/v{}/{}/action/{}",
            host.trim_end_matches('/'),
            self.version,
            self.service,
            action
        ))
    }
}

impl RequestGenerator for DefaultRequestGenerator {
    fn generate(&self, _token: &Token, host: &str, action: &str) -> Result<Request, GeneratorError> {
        let url = self.action_url(host, action)?;
        Ok(Request::new(Method::POST, url))
    }
}

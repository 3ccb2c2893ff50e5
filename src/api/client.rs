//
//  livechat-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Action Dispatcher
//!
//! This module provides [`Api`], the authenticated call path shared by every
//! service client. Given an action name and a serializable payload it:
//!
//! 1. Encodes the payload as JSON
//! 2. Fetches a token from the [`TokenSource`] and checks its scheme
//! 3. Asks the [`RequestGenerator`] for the base request
//! 4. Sets `Content-Type`, `Authorization`, `User-Agent` and `X-Region`
//! 5. Applies the custom headers, which win over the ones above
//! 6. Sends the request once and decodes the response
//!
//! ## Features
//!
//! - Pluggable URL shape per backend service
//! - Custom headers and host read at call time
//! - No retries; every failure goes straight back to the caller

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::Error;
use super::generator::{DefaultRequestGenerator, RequestGenerator};
use super::response;
use crate::auth::{Token, TokenSource};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "https://api.livechatinc.com";

/// Overall timeout of the transport created when none is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Prefix of the `User-Agent` header; the client id follows it.
pub const USER_AGENT_TAG: &str = "Rust SDK Application";

/// Service targeted by the default request generator.
pub const DEFAULT_SERVICE: &str = "configuration";

/// Name of the region header.
pub static X_REGION: HeaderName = HeaderName::from_static("x-region");

type Result<T> = std::result::Result<T, Error>;

/// The raw action dispatcher.
///
/// This is the base used by specialized clients for each backend service;
/// they differ only in the [`RequestGenerator`] they pass in.
///
/// # Creating a Dispatcher
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use livechat_api::api::{Api, DefaultRequestGenerator};
/// use livechat_api::auth::{StaticToken, Token};
///
/// let api = Api::new(
///     Some(Arc::new(StaticToken::new(Token::bearer("access-token", "dal")))),
///     None,
///     "my-client-id",
///     Arc::new(DefaultRequestGenerator::new("configuration")),
/// )?;
/// # Ok::<(), livechat_api::api::Error>(())
/// ```
///
/// # Shared State
///
/// The host and custom headers sit behind read/write locks, so the setters
/// take `&self` and an `Api` can be shared through an `Arc`. A call reads
/// both once, when it builds its request; changing them while a call is in
/// flight does not affect that call.
pub struct Api {
    /// The underlying HTTP client
    http: Client,
    /// Sent in the `User-Agent` header
    client_id: String,
    token_source: Arc<dyn TokenSource>,
    request_generator: Arc<dyn RequestGenerator>,
    host: RwLock<String>,
    custom_headers: RwLock<HeaderMap>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("client_id", &self.client_id)
            .field("host", &self.host())
            .field("custom_headers", &self.custom_headers())
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Creates a ready to use dispatcher.
    ///
    /// # Parameters
    ///
    /// * `token_source` - Supplies the credential for every call; required
    /// * `http` - Transport to use; a client with a 20 second timeout is built
    ///   when `None`
    /// * `client_id` - Sent as part of the `User-Agent` header
    /// * `request_generator` - Builds the base request for each action
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTokenSource`] when `token_source` is `None`, or
    /// [`Error::Transport`] if the default transport cannot be created.
    pub fn new(
        token_source: Option<Arc<dyn TokenSource>>,
        http: Option<Client>,
        client_id: impl Into<String>,
        request_generator: Arc<dyn RequestGenerator>,
    ) -> Result<Self> {
        let token_source = token_source.ok_or(Error::MissingTokenSource)?;
        let http = match http {
            Some(http) => http,
            None => default_client(DEFAULT_TIMEOUT)?,
        };

        Ok(Self {
            http,
            client_id: client_id.into(),
            token_source,
            request_generator,
            host: RwLock::new(DEFAULT_HOST.to_string()),
            custom_headers: RwLock::new(HeaderMap::new()),
        })
    }

    /// Starts an [`ApiBuilder`].
    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    /// Sends `payload` to `action` and decodes the response into `T`.
    ///
    /// # Type Parameters
    ///
    /// * `P` - The request payload, serialized as JSON
    /// * `T` - The type to deserialize a 200 response body into
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payload cannot be serialized ([`Error::Encode`])
    /// - The token source returns nothing ([`Error::TokenUnavailable`])
    /// - The token scheme is neither Bearer nor Basic
    ///   ([`Error::UnsupportedTokenType`]); nothing is sent in that case
    /// - The request cannot be built ([`Error::RequestBuild`])
    /// - The network request fails ([`Error::Transport`])
    /// - The service answers with anything but 200 ([`Error::Api`] or
    ///   [`Error::UnexpectedResponse`])
    /// - A 200 body does not match `T` ([`Error::Decode`])
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use livechat_api::api::Api;
    /// use livechat_api::auth::{StaticToken, Token};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize)]
    /// struct ListBots { all: bool }
    ///
    /// #[derive(Deserialize)]
    /// struct Bot { id: String }
    ///
    /// # async fn example() -> Result<(), livechat_api::api::Error> {
    /// let api = Api::builder()
    ///     .token_source(StaticToken::new(Token::bearer("access-token", "dal")))
    ///     .build()?;
    ///
    /// let bots: Vec<Bot> = api.call("list_bots", &ListBots { all: true }).await?;
    /// for bot in bots {
    ///     println!("{}", bot.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<P, T>(&self, action: &str, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(payload).map_err(Error::Encode)?;

        let token = self.current_token()?;
        if !token.token_type.is_supported() {
            return Err(Error::UnsupportedTokenType(token.token_type.to_string()));
        }

        let mut request = self.base_request(&token, action)?;
        *request.body_mut() = Some(body.into());

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.insert_identity_headers(headers, token.authorization(), &token.region)?;
        self.apply_custom_headers(headers);

        self.send(request).await
    }

    /// Sets a header sent with every subsequent [`call`](Self::call).
    ///
    /// Setting the same key again replaces the previous value. A custom header
    /// overrides a generated header of the same name, including
    /// `Authorization` and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the name or value is not valid HTTP.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use livechat_api::api::Api;
    /// # use livechat_api::auth::{StaticToken, Token};
    /// # let api = Api::builder().token_source(StaticToken::new(Token::bearer("t", "dal"))).build()?;
    /// api.set_custom_header("X-Debug-Id", "trace-42")?;
    /// api.set_custom_header("X-Author-Id", "agent@example.com")?;
    /// # Ok::<(), livechat_api::api::Error>(())
    /// ```
    pub fn set_custom_header(&self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidHeader {
            name: key.to_string(),
            reason,
        };
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;

        self.custom_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, value);
        Ok(())
    }

    /// Stops sending a header previously set with
    /// [`set_custom_header`](Self::set_custom_header).
    ///
    /// Returns `true` if the header was set.
    pub fn remove_custom_header(&self, key: &str) -> bool {
        let Ok(name) = HeaderName::from_bytes(key.as_bytes()) else {
            return false;
        };
        self.custom_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    /// Returns a snapshot of the configured custom headers.
    pub fn custom_headers(&self) -> HeaderMap {
        self.custom_headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Changes the host used by every subsequent call.
    ///
    /// Meant for pointing the client at a test double; production traffic
    /// should use the default host.
    pub fn set_custom_host(&self, host: impl Into<String>) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = host.into();
    }

    /// Returns the host calls are currently sent to.
    pub fn host(&self) -> String {
        self.host
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn current_token(&self) -> Result<Token> {
        self.token_source.token().ok_or(Error::TokenUnavailable)
    }

    /// Runs the request generator against the current host.
    pub(crate) fn base_request(&self, token: &Token, action: &str) -> Result<Request> {
        let host = self.host();
        tracing::debug!(action, host = %host, "dispatching action");

        self.request_generator
            .generate(token, &host, action)
            .map_err(|e| Error::RequestBuild(e.to_string()))
    }

    /// Sets `Authorization`, `User-Agent` and `X-Region`.
    pub(crate) fn insert_identity_headers(
        &self,
        headers: &mut HeaderMap,
        authorization: String,
        region: &str,
    ) -> Result<()> {
        let mut authorization = header_value(AUTHORIZATION.as_str(), &authorization)?;
        authorization.set_sensitive(true);

        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            USER_AGENT,
            header_value(
                USER_AGENT.as_str(),
                &format!("{} {}", USER_AGENT_TAG, self.client_id),
            )?,
        );
        headers.insert(X_REGION.clone(), header_value(X_REGION.as_str(), region)?);
        Ok(())
    }

    fn apply_custom_headers(&self, headers: &mut HeaderMap) {
        let custom = self
            .custom_headers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for (name, value) in custom.iter() {
            headers.insert(name.clone(), value.clone());
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.http.execute(request).await?;
        response::decode(response).await
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::RequestBuild(format!("invalid value for header {name}: {e}")))
}

fn default_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Step-by-step construction of an [`Api`].
///
/// Everything except the token source has a default:
///
/// | Setting | Default |
/// |---------|---------|
/// | `http_client` | new client with `timeout` |
/// | `timeout` | 20 seconds |
/// | `client_id` | empty |
/// | `request_generator` | [`DefaultRequestGenerator`] for `configuration` |
/// | `host` | [`DEFAULT_HOST`] |
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use livechat_api::api::{Api, DefaultRequestGenerator};
/// use livechat_api::auth::{StaticToken, Token};
///
/// let api = Api::builder()
///     .token_source(StaticToken::new(Token::bearer("access-token", "dal")))
///     .client_id("my-client-id")
///     .request_generator(DefaultRequestGenerator::new("agent"))
///     .timeout(Duration::from_secs(5))
///     .header("X-Debug-Id", "trace-42")
///     .build()?;
/// # Ok::<(), livechat_api::api::Error>(())
/// ```
#[derive(Default)]
pub struct ApiBuilder {
    token_source: Option<Arc<dyn TokenSource>>,
    http: Option<Client>,
    timeout: Option<Duration>,
    client_id: String,
    request_generator: Option<Arc<dyn RequestGenerator>>,
    host: Option<String>,
    headers: Vec<(String, String)>,
}

impl ApiBuilder {
    pub fn token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    /// Uses an already shared token source.
    pub fn shared_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Uses an existing transport. `timeout` is ignored when this is set.
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn request_generator(mut self, generator: impl RequestGenerator + 'static) -> Self {
        self.request_generator = Some(Arc::new(generator));
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Adds a custom header, see [`Api::set_custom_header`].
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Builds the dispatcher.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTokenSource`] if no token source was given
    /// - [`Error::InvalidHeader`] if a header added with [`header`](Self::header) is invalid
    /// - [`Error::Transport`] if the default transport cannot be created
    pub fn build(self) -> Result<Api> {
        let http = match (self.http, self.timeout) {
            (Some(http), _) => Some(http),
            (None, Some(timeout)) => Some(default_client(timeout)?),
            (None, None) => None,
        };
        let generator = self
            .request_generator
            .unwrap_or_else(|| Arc::new(DefaultRequestGenerator::new(DEFAULT_SERVICE)));

        let api = Api::new(self.token_source, http, self.client_id, generator)?;
        if let Some(host) = self.host {
            api.set_custom_host(host);
        }
        for (key, value) in &self.headers {
            api.set_custom_header(key, value)?;
        }
        Ok(api)
    }
}

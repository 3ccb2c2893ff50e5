//
//  livechat-api
//  api/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # File Uploads
//!
//! [`FileUploadApi`] is an [`Api`] with one extra operation: sending a file as
//! `multipart/form-data` to the `upload_file` action and returning the URL the
//! service hosts it under.
//!
//! The upload path builds its own request instead of going through
//! [`Api::call`]:
//!
//! - the `Authorization` header always uses the Bearer scheme, whatever the
//!   token declares
//! - the token scheme is not validated
//! - custom headers are not applied
//!
//! The returned URL expires after roughly 24 hours and should be passed to a
//! single follow-up action (for example sending a file event) before then.

use std::ops::Deref;
use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;

use super::client::Api;
use super::common::Error;
use super::generator::RequestGenerator;
use crate::auth::TokenSource;

/// Action the upload is posted to.
pub const UPLOAD_FILE_ACTION: &str = "upload_file";

/// Form field name of the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Body of a successful upload.
#[derive(Debug, Deserialize)]
struct UploadedFile {
    url: String,
}

/// Dispatcher with file upload support.
///
/// Dereferences to [`Api`], so [`call`](Api::call) and the header and host
/// setters are available directly.
///
/// # Example
///
/// ```rust,no_run
/// use livechat_api::api::{Api, FileUploadApi};
/// use livechat_api::auth::{StaticToken, Token};
///
/// # async fn example() -> Result<(), livechat_api::api::Error> {
/// let api = FileUploadApi::from(
///     Api::builder()
///         .token_source(StaticToken::new(Token::bearer("access-token", "dal")))
///         .request_generator(livechat_api::api::DefaultRequestGenerator::new("agent"))
///         .build()?,
/// );
///
/// let url = api.upload_file("report.pdf", std::fs::read("report.pdf").unwrap()).await?;
/// println!("uploaded to {url}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileUploadApi {
    api: Api,
}

impl FileUploadApi {
    /// Creates a dispatcher with file upload support.
    ///
    /// Takes the same arguments as [`Api::new`] and fails the same way.
    pub fn new(
        token_source: Option<Arc<dyn TokenSource>>,
        http: Option<Client>,
        client_id: impl Into<String>,
        request_generator: Arc<dyn RequestGenerator>,
    ) -> Result<Self, Error> {
        Api::new(token_source, http, client_id, request_generator).map(Self::from)
    }

    /// Uploads `file` under `filename` and returns its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The multipart body cannot be built ([`Error::Multipart`])
    /// - The token source returns nothing ([`Error::TokenUnavailable`])
    /// - The request cannot be built ([`Error::RequestBuild`])
    /// - The network request fails ([`Error::Transport`])
    /// - The service answers with anything but 200 ([`Error::Api`] or
    ///   [`Error::UnexpectedResponse`])
    /// - The 200 body carries no `url` ([`Error::Decode`])
    pub async fn upload_file(&self, filename: &str, file: impl Into<Vec<u8>>) -> Result<String, Error> {
        let part = Part::bytes(file.into())
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| Error::Multipart(format!("couldn't create form file: {e}")))?;
        let form = Form::new().part(FILE_FIELD, part);
        let content_type = format!("multipart/form-data; boundary={}", form.boundary());

        let token = self.current_token()?;
        let mut request = self.base_request(&token, UPLOAD_FILE_ACTION)?;
        *request.method_mut() = Method::POST;

        let mut request = RequestBuilder::from_parts(self.http().clone(), request)
            .multipart(form)
            .build()
            .map_err(|e| Error::Multipart(format!("couldn't finalize multipart body: {e}")))?;

        let headers = request.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&content_type).map_err(|e| Error::Multipart(e.to_string()))?,
        );
        self.insert_identity_headers(headers, token.bearer_authorization(), &token.region)?;

        let uploaded: UploadedFile = self.send(request).await?;
        Ok(uploaded.url)
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn into_inner(self) -> Api {
        self.api
    }
}

impl From<Api> for FileUploadApi {
    fn from(api: Api) -> Self {
        Self { api }
    }
}

impl Deref for FileUploadApi {
    type Target = Api;

    fn deref(&self) -> &Api {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DefaultRequestGenerator;
    use crate::auth::{StaticToken, Token, TokenType};
    use mockito::{Matcher, Server};

    fn upload_api(server: &Server, token: Token) -> FileUploadApi {
        let api = Api::builder()
            .token_source(StaticToken::new(token))
            .client_id("client-123")
            .request_generator(DefaultRequestGenerator::new("agent"))
            .host(server.url())
            .build()
            .unwrap();
        FileUploadApi::from(api)
    }

    #[test]
    fn test_new_requires_token_source() {
        let err = FileUploadApi::new(None, None, "id", Arc::new(DefaultRequestGenerator::new("agent")))
            .unwrap_err();
        assert!(matches!(err, Error::MissingTokenSource));
    }

    #[tokio::test]
    async fn test_upload_returns_url() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v3.3/agent/action/upload_file")
            .match_header("authorization", "Bearer secret")
            .match_header("user-agent", "Rust SDK Application client-123")
            .match_header("x-region", "dal")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+$".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="notes.txt""#.to_string()),
                Matcher::Regex("hello upload".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"url":"https://cdn.example/x"}"#)
            .expect(1)
            .create_async()
            .await;

        let api = upload_api(&server, Token::bearer("secret", "dal"));
        let url = api.upload_file("notes.txt", b"hello upload".to_vec()).await.unwrap();

        assert_eq!(url, "https://cdn.example/x");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_always_uses_bearer_scheme() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v3.3/agent/action/upload_file")
            .match_header("authorization", "Bearer dXNlcjpwYXNz")
            .with_status(200)
            .with_body(r#"{"url":"https://cdn.example/y"}"#)
            .create_async()
            .await;

        let api = upload_api(&server, Token::basic_from_credentials("user", "pass", "fra"));
        api.upload_file("a.bin", vec![0u8, 1, 2]).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_does_not_check_scheme() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v3.3/agent/action/upload_file")
            .match_header("authorization", "Bearer x")
            .with_status(200)
            .with_body(r#"{"url":"https://cdn.example/z"}"#)
            .create_async()
            .await;

        let api = upload_api(&server, Token::new(TokenType::from("Digest"), "x", "dal"));
        assert_eq!(api.upload_file("a.bin", vec![1u8]).await.unwrap(), "https://cdn.example/z");
    }

    #[tokio::test]
    async fn test_upload_forbidden() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v3.3/agent/action/upload_file")
            .with_status(403)
            .with_body(r#"{"error":{"type":"authorization","message":"Access denied"}}"#)
            .create_async()
            .await;

        let api = upload_api(&server, Token::bearer("secret", "dal"));
        let err = api.upload_file("notes.txt", b"data".to_vec()).await.unwrap_err();

        let api_err = err.as_api_error().expect("structured error");
        assert_eq!(api_err.code, "authorization");
        assert_eq!(api_err.message, "Access denied");
    }

    #[tokio::test]
    async fn test_upload_without_token_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let api = FileUploadApi::from(
            Api::builder()
                .token_source(|| None::<Token>)
                .host(server.url())
                .build()
                .unwrap(),
        );
        let err = api.upload_file("notes.txt", b"data".to_vec()).await.unwrap_err();

        assert!(matches!(err, Error::TokenUnavailable));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_ignores_custom_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v3.3/agent/action/upload_file")
            .match_header("x-debug-id", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"url":"https://cdn.example/x"}"#)
            .create_async()
            .await;

        let api = upload_api(&server, Token::bearer("secret", "dal"));
        api.set_custom_header("X-Debug-Id", "trace-42").unwrap();
        api.upload_file("notes.txt", b"data".to_vec()).await.unwrap();
        mock.assert_async().await;
    }
}

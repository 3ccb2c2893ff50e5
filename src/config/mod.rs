//
//  livechat-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for building an [`Api`](crate::api::Api) from a TOML file instead
//! of code. Credentials are never part of the file; they always come from a
//! [`TokenSource`].
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/lcapi/config.toml`
//! - **macOS**: `~/Library/Application Support/lcapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\lcapi\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! host = "https://api.livechatinc.com"
//! client_id = "0805e283233042b37f460ed8fbf22160"
//! service = "configuration"
//! timeout_secs = 20
//!
//! [headers]
//! X-Debug-Id = "trace-42"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use livechat_api::auth::{StaticToken, Token};
//! use livechat_api::config::ApiConfig;
//!
//! let config = ApiConfig::load()?;
//! let api = config
//!     .builder(StaticToken::new(Token::bearer("access-token", "dal")))
//!     .build()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{Api, ApiBuilder, DefaultRequestGenerator, DEFAULT_HOST, DEFAULT_SERVICE, DEFAULT_TIMEOUT};
use crate::auth::TokenSource;

/// Dispatcher settings.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `host` | `"https://api.livechatinc.com"` |
/// | `client_id` | `""` |
/// | `service` | `"configuration"` |
/// | `api_version` | `None` (stable version) |
/// | `timeout_secs` | `20` |
/// | `headers` | empty |
///
/// # Examples
///
/// ```rust
/// use livechat_api::config::ApiConfig;
///
/// let config: ApiConfig = toml::from_str("service = \"agent\"").unwrap();
/// assert_eq!(config.service, "agent");
/// assert_eq!(config.timeout_secs, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL actions are sent to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Client identifier sent in the `User-Agent` header.
    #[serde(default)]
    pub client_id: String,

    /// Backend service segment of the action URL.
    #[serde(default = "default_service")]
    pub service: String,

    /// API version segment; the stable version when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Overall request timeout in seconds; `0` means the default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom headers sent with every call.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            client_id: String::new(),
            service: default_service(),
            api_version: None,
            timeout_secs: default_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }
}

impl ApiConfig {
    /// Loads the configuration from the default location.
    ///
    /// Returns the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path of the default configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Sets a custom header, replacing any entry whose name differs only in
    /// case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Returns the request generator for the configured service and version.
    pub fn request_generator(&self) -> DefaultRequestGenerator {
        let generator = DefaultRequestGenerator::new(&self.service);
        match &self.api_version {
            Some(version) => generator.with_version(version),
            None => generator,
        }
    }

    /// Returns an [`ApiBuilder`] preloaded with these settings.
    ///
    /// Headers are validated when the builder is built.
    pub fn builder(&self, token_source: impl TokenSource + 'static) -> ApiBuilder {
        let builder = Api::builder()
            .token_source(token_source)
            .client_id(&self.client_id)
            .host(&self.host)
            .timeout(self.timeout())
            .request_generator(self.request_generator());

        self.headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{StaticToken, Token};

    #[test]
    fn test_empty_file_is_default() {
        let config: ApiConfig = toml::from_str("").unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ApiConfig {
            client_id: "abc".to_string(),
            service: "agent".to_string(),
            api_version: Some("3.4".to_string()),
            timeout_secs: 5,
            ..Default::default()
        };
        config.headers.insert("X-Debug-Id".to_string(), "trace".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(ApiConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = ApiConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_request_generator_uses_version() {
        let config = ApiConfig {
            service: "agent".to_string(),
            api_version: Some("3.4".to_string()),
            ..Default::default()
        };
        let url = config.request_generator().action_url("https://h.example", "x").unwrap();
        assert_eq!(url.path(), "/v3.4/agent/action/x");
    }

    #[test]
    fn test_builder_applies_settings() {
        let mut config = ApiConfig {
            host: "http://localhost:8080".to_string(),
            client_id: "abc".to_string(),
            ..Default::default()
        };
        config.headers.insert("X-Debug-Id".to_string(), "trace".to_string());

        let api = config
            .builder(StaticToken::new(Token::bearer("t", "dal")))
            .build()
            .unwrap();
        assert_eq!(api.host(), "http://localhost:8080");
        assert_eq!(api.client_id(), "abc");
        assert_eq!(api.custom_headers()["x-debug-id"], "trace");
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config: ApiConfig = toml::from_str("timeout_secs = 0").unwrap();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = ApiConfig {
            timeout_secs: 3,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_set_header_replaces_any_casing() {
        let mut config = ApiConfig::default();
        config.headers.insert("x-debug-id".to_string(), "from-file".to_string());
        config.set_header("X-Debug-Id", "from-flag");

        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers["X-Debug-Id"], "from-flag");

        let api = config
            .builder(StaticToken::new(Token::bearer("t", "dal")))
            .build()
            .unwrap();
        assert_eq!(api.custom_headers()["x-debug-id"], "from-flag");
    }

    #[test]
    fn test_builder_surfaces_invalid_headers() {
        let mut config = ApiConfig::default();
        config.headers.insert("bad header".to_string(), "x".to_string());

        let result = config.builder(StaticToken::new(Token::bearer("t", "dal"))).build();
        assert!(result.is_err());
    }
}

//
//  livechat-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod call;
mod upload;

pub use call::CallCommand;
pub use upload::UploadCommand;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::auth::{Token, TokenSource, TokenType};
use crate::config::ApiConfig;

/// lcapi - Call LiveChat API actions from the command line
#[derive(Parser, Debug)]
#[command(
    name = "lcapi",
    version,
    about = "Call LiveChat API actions from the command line",
    long_about = "lcapi sends authenticated actions to the LiveChat APIs and prints the JSON response.\n\n\
                  The access token is read from LCAPI_TOKEN.",
    propagate_version = true,
    after_help = "Use 'lcapi <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "LCAPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// API host, e.g. https://api.livechatinc.com
    #[arg(long, global = true, env = "LCAPI_HOST")]
    pub host: Option<String>,

    /// Backend service (configuration, agent, customer, ...)
    #[arg(long, short = 's', global = true, env = "LCAPI_SERVICE")]
    pub service: Option<String>,

    /// API version
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Client identifier sent in the User-Agent header
    #[arg(long, global = true, env = "LCAPI_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Custom header in 'Name: Value' form (can be specified multiple times)
    #[arg(long, short = 'H', global = true, action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Access token
    #[arg(long, global = true, env = "LCAPI_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Token scheme (Bearer or Basic)
    #[arg(long, global = true, env = "LCAPI_TOKEN_TYPE", default_value = "Bearer")]
    pub token_type: String,

    /// Region of the token, sent as X-Region
    #[arg(long, global = true, env = "LCAPI_REGION", default_value = "")]
    pub region: String,
}

impl GlobalOptions {
    /// Loads the configuration file and applies command-line overrides.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let mut config = match &self.config {
            Some(path) => ApiConfig::load_from(path)?,
            None => ApiConfig::load()?,
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(service) = &self.service {
            config.service = service.clone();
        }
        if let Some(version) = &self.api_version {
            config.api_version = Some(version.clone());
        }
        if let Some(client_id) = &self.client_id {
            config.client_id = client_id.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        for header in &self.header {
            let (name, value) = parse_header(header)?;
            config.set_header(name, value);
        }

        Ok(config)
    }

    /// Returns a token source yielding the token given on the command line,
    /// or nothing when no token was given.
    pub fn token_source(&self) -> impl TokenSource + 'static {
        let token = self.token.as_ref().map(|access| {
            Token::new(
                TokenType::from(self.token_type.as_str()),
                access.clone(),
                self.region.clone(),
            )
        });
        move || token.clone()
    }
}

fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        bail!("Invalid header format: {}. Expected 'Name: Value'", header);
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an action and print the response
    Call(CallCommand),

    /// Upload a file and print its URL
    Upload(UploadCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Debug-Id: trace-42").unwrap(),
            ("X-Debug-Id".to_string(), "trace-42".to_string())
        );
        assert!(parse_header("no-colon").is_err());
    }

    #[test]
    fn test_cli_parses_call() {
        let cli = Cli::try_parse_from([
            "lcapi",
            "--host",
            "http://localhost:1",
            "-H",
            "X-Debug-Id: 1",
            "call",
            "list_bots",
            "-d",
            "{\"all\":true}",
        ])
        .unwrap();

        assert_eq!(cli.global.host.as_deref(), Some("http://localhost:1"));
        assert_eq!(cli.global.header, vec!["X-Debug-Id: 1".to_string()]);
        match cli.command {
            Commands::Call(call) => assert_eq!(call.action, "list_bots"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service = \"agent\"\nclient_id = \"from-file\"\n").unwrap();

        let global = GlobalOptions {
            config: Some(path),
            client_id: Some("from-flag".to_string()),
            header: vec!["X-Author-Id: a@example.com".to_string()],
            ..Default::default()
        };
        let config = global.api_config().unwrap();

        assert_eq!(config.service, "agent");
        assert_eq!(config.client_id, "from-flag");
        assert_eq!(config.headers["X-Author-Id"], "a@example.com");
    }

    #[test]
    fn test_flag_header_wins_over_file_regardless_of_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[headers]\nx-debug-id = \"from-file\"\n").unwrap();

        let global = GlobalOptions {
            config: Some(path),
            header: vec!["X-Debug-Id: from-flag".to_string()],
            ..Default::default()
        };
        let api = global
            .api_config()
            .unwrap()
            .builder(global.token_source())
            .build()
            .unwrap();

        assert_eq!(api.custom_headers()["x-debug-id"], "from-flag");
    }

    #[test]
    fn test_token_source_without_token() {
        let global = GlobalOptions::default();
        assert!(global.token_source().token().is_none());
    }

    #[test]
    fn test_token_source_with_token() {
        let global = GlobalOptions {
            token: Some("abc".to_string()),
            token_type: "Basic".to_string(),
            region: "fra".to_string(),
            ..Default::default()
        };
        assert_eq!(global.token_source().token(), Some(Token::basic("abc", "fra")));
    }
}

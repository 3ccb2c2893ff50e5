//
//  livechat-api
//  cli/call.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Generic action command
//!
//! Sends any action to the configured service and prints the JSON response.
//!
//! ## Examples
//!
//! ```bash
//! # List bots through the Configuration API
//! lcapi call list_bots -F all=true
//!
//! # Send a raw JSON body to the Agent API
//! lcapi -s agent call list_chats -d '{"limit": 10}'
//!
//! # Read the body from a file, or stdin with -
//! lcapi call create_bot -f bot.json
//! ```

use std::fs;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::Value;

use super::GlobalOptions;

/// Send an action and print the response
#[derive(Args, Debug)]
pub struct CallCommand {
    /// Action name (e.g., list_bots)
    pub action: String,

    /// Request body as a JSON document
    #[arg(long, short = 'd', conflicts_with_all = ["input", "field"])]
    pub data: Option<String>,

    /// Read request body from file (- for stdin)
    #[arg(long, short = 'f', conflicts_with = "field")]
    pub input: Option<String>,

    /// Request body fields (key=value, can be nested with dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl CallCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let payload = self.build_body()?;
        let api = global.api_config()?.builder(global.token_source()).build()?;

        let response: Value = api.call(&self.action, &payload).await?;

        if self.compact {
            println!("{}", response);
        } else {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Ok(())
    }

    fn build_body(&self) -> Result<Value> {
        if let Some(data) = &self.data {
            return Ok(serde_json::from_str(data)?);
        }

        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };
            return Ok(serde_json::from_str(&content)?);
        }

        let mut body = serde_json::Map::new();
        for field in &self.field {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut body, &key, value);
        }
        Ok(Value::Object(body))
    }
}

fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = field.split_once('=') else {
        bail!("Invalid field format: {}. Expected key=value", field);
    };

    // Anything that parses as JSON keeps its type; the rest is a string.
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn set_nested_value(obj: &mut serde_json::Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

//
//  livechat-api
//  cli/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! File upload command
//!
//! ```bash
//! lcapi -s agent upload ./screenshot.png
//! lcapi -s agent upload ./report.bin --name report.pdf
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::api::FileUploadApi;

use super::GlobalOptions;

/// Upload a file and print its URL
#[derive(Args, Debug)]
pub struct UploadCommand {
    /// File to upload
    pub path: PathBuf,

    /// File name sent to the service (defaults to the file's own name)
    #[arg(long)]
    pub name: Option<String>,
}

impl UploadCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let filename = self.file_name()?;
        let content = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let api = FileUploadApi::from(global.api_config()?.builder(global.token_source()).build()?);
        let url = api.upload_file(&filename, content).await?;

        // The URL expires in about 24 hours.
        println!("{}", url);
        Ok(())
    }

    fn file_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", self.path.display()))
    }
}

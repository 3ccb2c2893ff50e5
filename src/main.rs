//
//  livechat-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use livechat_api::cli::{Cli, Commands};
use livechat_api::{exit_codes, Error, ErrorKind};

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("LCAPI_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Call(cmd) => cmd.run(&cli.global).await,
        Commands::Upload(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("lcapi version {}", livechat_api::VERSION);
            Ok(())
        }
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>().map(Error::kind) {
        Some(ErrorKind::Authentication) => exit_codes::AUTH_ERROR,
        Some(ErrorKind::Remote) => exit_codes::API_ERROR,
        Some(ErrorKind::Transport) => exit_codes::NETWORK_ERROR,
        _ => exit_codes::ERROR,
    }
}

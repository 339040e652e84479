//! `fetchdemo`: runs the HTTP and callback demos from the command line.
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

use std::io;

use anyhow::Result;
use clap::Parser as _;
use fetchdemo_core::DemoConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod cli;
mod handlers;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fetchdemo=info".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = DemoConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Http { base_url, lenient } => {
            handlers::handle_http(config, base_url, lenient).await?;
        }
        Commands::Callbacks { delay_ms, linear } => {
            handlers::handle_callbacks(config, delay_ms, linear).await?;
        }
        Commands::Config { full } => {
            handlers::handle_config(&config, cli.config.as_deref(), full)?;
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "fetchdemo")]
#[command(about = "Asynchronous fetch and callback demos", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Demo to run.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "List users, render them, then create a sample post and user")]
    Http {
        #[arg(long, help = "Fixture API base URL (overrides config)")]
        base_url: Option<String>,

        #[arg(long, help = "Log non-success statuses and keep parsing the body")]
        lenient: bool,
    },

    #[command(about = "Run the nested-timer steps and the simulated login flow")]
    Callbacks {
        #[arg(long, help = "Simulated latency per step in milliseconds (overrides config)")]
        delay_ms: Option<u64>,

        #[arg(long, help = "Use the linear async flow instead of nested continuations")]
        linear: bool,
    },

    #[command(about = "Show the effective configuration")]
    Config {
        #[arg(long, help = "Also list where each value may come from")]
        full: bool,
    },
}

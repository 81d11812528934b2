use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod bridge;
mod cli;
mod config;
mod error;
mod generator;
mod output;
mod review;
mod worker;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("aspectrev=debug")
    } else {
        EnvFilter::new("aspectrev=warn")
    };

    // Stdout is reserved for reports and worker records
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Review(args) => cli::review::execute(args).await,
        Commands::Worker(args) => cli::worker::execute(args).await,
        Commands::Tool(args) => cli::tool::execute(args).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}

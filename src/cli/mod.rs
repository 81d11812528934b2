pub mod review;
pub mod schema;
pub mod tool;
pub mod worker;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aspectrev")]
#[command(
    author,
    version,
    about = "Review code from several aspects at once, one isolated worker process per aspect"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review code and print the aggregated report
    Review(ReviewArgs),

    /// Serve one aspect: read code on stdin, print one JSON record
    #[command(hide = true)]
    Worker(WorkerArgs),

    /// Answer one host-agent tool call read from stdin
    Tool(ToolArgs),

    /// Print the tool definition (or the config JSON Schema)
    Schema(SchemaArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Parser, Clone)]
pub struct ReviewArgs {
    /// File to review (reads stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Aspects to review, in report order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub aspects: Option<Vec<String>>,

    /// Path to config file
    #[arg(short, long, env = "ASPECTREV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Kill any worker still running after this many seconds
    #[arg(long)]
    pub timeout_sec: Option<u64>,

    /// Cap on workers running at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Exit 1 if any aspect failed (CI mode)
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Parser, Clone)]
pub struct WorkerArgs {
    /// Aspect to review
    #[arg(long)]
    pub aspect: String,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct ToolArgs {
    /// Path to config file
    #[arg(short, long, env = "ASPECTREV_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the config file schema instead of the tool definition
    #[arg(long)]
    pub config_schema: bool,
}

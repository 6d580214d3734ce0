use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zeal-docs")]
#[command(about = "Find installed Zeal docsets by fuzzy keyword and open them", long_about = None)]
pub struct Cli {
    /// TOML file with default settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing *.docset bundles
    #[arg(long, global = true, env = "ZEAL_DOCSETS_PATH")]
    pub docsets_path: Option<String>,

    /// Viewer executable to launch
    #[arg(long, global = true, env = "ZEAL_VIEWER")]
    pub viewer: Option<String>,

    /// Log at DEBUG level (RUST_LOG still applies)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// List docsets matching `<keyword> [query]`
    List {
        input: Option<String>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print the result list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the best docset for a keyword fragment
    Open { keyword: String, query: String },
}

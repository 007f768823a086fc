use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(version, about = "Hunts leaked Shodan API keys in public GitHub code", long_about = None)]
pub struct Cli {
    /// File containing the GitHub API token
    #[arg(short = 'k', long, value_name = "FILE")]
    pub key_file: PathBuf,

    /// Custom search term (overrides the built-in marker term)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Check extracted keys against the Shodan API
    #[arg(long)]
    pub validate: bool,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

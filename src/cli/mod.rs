// CLI module for basic-api
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// basic-api - HTTP router bootstrap with a PostgreSQL-backed /api tree
#[derive(Parser, Debug)]
#[command(name = "basic-api", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.basic-api/config.toml)
    #[arg(short, long, env = "BASIC_API_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen port from the config
    #[arg(short, long)]
    pub port: Option<u16>,
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Get the gold query text after entity detection",
    long_about = None
)]
pub struct Config {
    /// Path to the NUMBERED dataset all.txt file
    #[arg(short = 'd', long)]
    pub dataset: PathBuf,

    /// Path to the results directory after entity detection
    #[arg(short = 'r', long)]
    pub result: PathBuf,

    /// Output directory for the query text
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}

pub fn parse() -> Config {
    Config::parse()
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("creating output directory {}", path.display()))
}

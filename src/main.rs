//! mdcheck - a structural linter for Markdown documentation
//!
//! mdcheck provides:
//! - Heuristic discovery of candidate documents under a repository root
//! - Fence-aware ATX heading and inline link extraction
//! - GitHub-style anchor slugification
//! - Relative link and fragment (anchor) resolution
//! - Policy rules (required sections, placeholders, line length)

use anyhow::Result;
use clap::Parser;

mod checks;
mod cli;
mod core;
mod markdown;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}

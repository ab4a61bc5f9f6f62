//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::checks::rules::{compile_section_patterns, RuleSet};
use crate::checks::runner::CheckOptions;
use crate::core::render::{OutputFormat, RenderConfig};

/// mdcheck - a structural linter for Markdown documentation.
#[derive(Parser, Debug)]
#[command(name = "mdcheck")]
#[command(
    author,
    version,
    about,
    long_about = r#"mdcheck validates the structure of Markdown documentation:
ATX headings, anchor slugs, relative links and fragment targets,
plus configurable policy rules (required sections, placeholders).

Each violation is printed as `path:line: [CODE] message` in the default
text format; jsonl/json/md formats emit the same findings machine-readably.
Exit code is 0 when no error-severity violations were found, 1 otherwise.

Examples:
    mdcheck check
    mdcheck check README.md docs/guide.md
    mdcheck check --pattern pipeline --require-section overview
    mdcheck discover readme
    mdcheck headings docs/guide.md
    mdcheck slug "Getting Started"
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
All paths emitted in results are relative to this root; root-relative link\n\
targets (leading '/') resolve against it."
    )]
    pub root: PathBuf,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): `path:line: [CODE] message` per violation\n\
- jsonl: one JSON object per line\n\
- json: a single JSON array\n\
- md (markdown): human-friendly Markdown"
    )]
    pub format: String,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (suppress the stderr summary).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (more diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate documents: links, anchors and style rules.
    #[command(
        long_about = "Validate Markdown documents under ROOT.\n\n\
With explicit PATHS, exactly those documents are checked. Otherwise documents\n\
are discovered: explicit --candidate paths first, then every Markdown file\n\
whose relative path contains a --pattern substring (or every Markdown file\n\
when no pattern is given), ranked so specific documents beat a generic README.\n\n\
All violations across all documents are collected before reporting; the scan\n\
never stops at the first failure.\n\n\
Examples:\n\
  mdcheck check\n\
  mdcheck check README.md\n\
  mdcheck check --pattern pipeline --require-section overview --require-section setup\n\
  mdcheck check --max-line-length 120 --strict\n"
    )]
    Check {
        /// Explicit document paths (relative to ROOT); bypasses discovery.
        #[arg(value_name = "PATHS", num_args = 0..)]
        paths: Vec<String>,

        /// Candidate relative path to prefer during discovery.
        #[arg(long, value_name = "REL", action = clap::ArgAction::Append)]
        candidate: Vec<String>,

        /// Case-insensitive path substring to select documents.
        #[arg(long, value_name = "SUBSTR", action = clap::ArgAction::Append)]
        pattern: Vec<String>,

        /// Require a heading matching REGEX (case-insensitive, repeatable).
        #[arg(long = "require-section", value_name = "REGEX", action = clap::ArgAction::Append)]
        require_section: Vec<String>,

        /// Maximum line length in characters (outside code fences).
        #[arg(long, value_name = "N")]
        max_line_length: Option<usize>,

        /// Do not require a level-1 heading.
        #[arg(long)]
        no_require_h1: bool,

        /// Do not warn about placeholder text (TBD, TODO:, FIXME).
        #[arg(long)]
        allow_placeholders: bool,

        /// Treat "no documents found" as a failure instead of a skip.
        #[arg(long)]
        strict: bool,
    },

    /// Discover candidate documents and print the ranked result.
    #[command(
        long_about = "Run document discovery and print the ranked, de-duplicated list.\n\n\
Examples:\n\
  mdcheck discover\n\
  mdcheck discover pipeline\n\
  mdcheck discover --candidate docs/README.md readme\n"
    )]
    Discover {
        /// Case-insensitive path substrings to select documents.
        #[arg(value_name = "PATTERNS", num_args = 0..)]
        patterns: Vec<String>,

        /// Candidate relative path to prefer.
        #[arg(long, value_name = "REL", action = clap::ArgAction::Append)]
        candidate: Vec<String>,
    },

    /// Extract ATX headings (with anchor slugs) from one file.
    Headings {
        /// File path (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Extract inline links and images from one file.
    Links {
        /// File path (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the anchor slug for a heading title.
    Slug {
        /// Heading title text.
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Check {
            paths,
            candidate,
            pattern,
            require_section,
            max_line_length,
            no_require_h1,
            allow_placeholders,
            strict,
        } => {
            let rules = RuleSet {
                require_h1: !no_require_h1,
                required_sections: compile_section_patterns(&require_section)?,
                max_line_length,
                check_placeholders: !allow_placeholders,
                ..Default::default()
            };
            let options = CheckOptions {
                explicit: paths,
                candidates: candidate,
                patterns: pattern,
                rules,
            };
            if cli.verbose {
                eprintln!("checking under {}", root.display());
            }
            crate::checks::runner::run_check(&root, &options, strict, cli.quiet, render_config)
        }

        Commands::Discover {
            patterns,
            candidate,
        } => crate::checks::discover::run_discover(&root, &candidate, &patterns, render_config),

        Commands::Headings { file } => {
            crate::markdown::heading::run_headings(&root, &file, render_config)
        }

        Commands::Links { file } => crate::markdown::link::run_links(&root, &file, render_config),

        Commands::Slug { text } => crate::markdown::slug::run_slug(&text),
    }
}

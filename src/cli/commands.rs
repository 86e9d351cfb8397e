use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

use crate::cli::args::{normalize_ct_shorthand, split_csv};
use crate::cli::logging::init_logging;
use crate::extract::{ExtractOptions, run as run_extraction};

/// Every flag falls back to an `OPENAI_SEARCH_*` environment variable when omitted.
#[derive(Parser, Debug)]
#[command(name = "chat-export-extractor")]
#[command(version = "0.1.0")]
#[command(
    about = "Extract full conversations from a ChatGPT export ZIP by multiple patterns (AND), with optional content-type/language filters",
    long_about = None
)]
pub struct Cli {
    /// Path to the ChatGPT export ZIP archive
    #[arg(short = 'f', long = "file", env = "OPENAI_SEARCH_FILE")]
    pub file: PathBuf,

    /// Case-insensitive search term or raw regex; repeat -p to AND multiple patterns
    #[arg(short = 'p', long = "pattern", env = "OPENAI_SEARCH_PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Output folder
    #[arg(short = 'o', long = "output", env = "OPENAI_SEARCH_OUTPUT")]
    pub output: PathBuf,

    /// Require ALL of these content types (comma-separated or repeated; -ct also works)
    #[arg(long = "content-type", env = "OPENAI_SEARCH_CONTENT_TYPE")]
    pub content_types: Vec<String>,

    /// Require ALL of these languages (comma-separated or repeated). Example: -l python -l go,js
    #[arg(short = 'l', long = "language", env = "OPENAI_SEARCH_LANGUAGE")]
    pub languages: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_options(self) -> ExtractOptions {
        ExtractOptions {
            archive_path: self.file,
            patterns: self.patterns,
            output_root: self.output,
            content_types: split_csv(&self.content_types),
            languages: split_csv(&self.languages),
        }
    }
}

/// Parse arguments (after `-ct` rewriting), wiring env fallbacks.
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString>,
{
    match Cli::try_parse_from(normalize_ct_shorthand(args)) {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(anyhow!("{}", err.render().to_string().trim_end())),
    }
}

pub fn run() -> Result<()> {
    let cli = parse_args(env::args_os())?;
    init_logging(cli.verbose);

    run_extraction(&cli.into_options())?;
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use crate::process::ScrapeOptions;
use crate::{DEFAULT_BASE_URL, DEFAULT_YEAR, FILE_PATH};

/// Fetch exam scores based on ID range
#[derive(Parser, Debug)]
#[command(name = "diemthi", version, about)]
pub struct Cli {
    /// Start of the ID range
    #[arg(long)]
    pub start: u64,

    /// End of the ID range (inclusive)
    #[arg(long)]
    pub end: u64,

    /// Number of lookups to run at the same time
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Exam year to look up
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: u16,

    /// Output CSV file, overwritten if it exists
    #[arg(long, default_value = FILE_PATH)]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

impl From<Cli> for ScrapeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            start: cli.start,
            end: cli.end,
            threads: cli.threads as usize,
            year: cli.year,
            base_url: cli.base_url,
            output: cli.output,
        }
    }
}

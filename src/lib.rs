//! DIEMTHI SCRAPER
//! Fetches exam scores by candidate id from diemthi.vnexpress.net and writes them to a CSV file.

pub mod cli;
mod error;
mod macros;
pub mod output;
mod parse;
pub mod process;
pub mod record;
mod request;

pub use error::{Error, Result};
pub use record::{ScoreRecord, Subject};

pub const DEFAULT_BASE_URL: &str = "https://diemthi.vnexpress.net";
pub const DEFAULT_YEAR: u16 = 2024;
pub const DEFAULT_THREADS: usize = 10;
pub const FILE_PATH: &str = "diemthi.csv";
const SCORE_TABLE_SELECTOR: &str = "table.e-table";

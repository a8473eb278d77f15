use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The score table is missing from the page. Selector: {0}")]
    MissingTable(String),
    #[error("Row {row} of the score table has {cells} cell(s), expected at least 2.")]
    MalformedRow { row: usize, cells: usize },
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    InvalidSelector(String),

    #[error("Unknown subject in score table: {0:?}")]
    UnknownSubject(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

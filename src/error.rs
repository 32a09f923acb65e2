use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Couldn't fetch the listing page: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Listing page {url} answered with HTTP status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("No day headers found on the page, the page layout has probably changed.")]
    NoDayHeaders,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Couldn't write the output file {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
}

/// A day label that can't be turned into a calendar date.
/// Only the events of that day group are dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("no day of month in label {0:?}")]
    MissingDay(String),
    #[error("no month in label {0:?}")]
    MissingMonth(String),
    #[error("{year}-{month:02}-{day:02} is not a valid date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A malformed event entry. Only that entry is dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("event entry has no link target (text: {name:?})")]
    MissingLink { name: String },
    #[error("event entry {link} has an empty name")]
    EmptyName { link: String },
    #[error("event link {href:?} can't be resolved: {reason}")]
    BadLink { href: String, reason: url::ParseError },
}

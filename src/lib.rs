//! Upcoming events scraper.
//! Fetches a single events listing page, groups events by the day headers on the page,
//! resolves the year-less day labels to calendar dates, dedupes and writes a dated CSV.

mod error;
mod macros;

pub mod config;
pub mod date;
pub mod dedup;
pub mod export;
pub mod extract;
pub mod parse;
pub mod process;
pub mod record;
pub mod request;

pub use error::{DateParseError, Error, Result, ValidationError};

const LISTING_URL: &str = "https://shotgun.live/en/cities/paris";
const OUTPUT_DIR: &str = "output";
const FILE_PREFIX: &str = "shotgun_paris_events";
/// How many days past the anchor date are still scraped.
const WINDOW_DAYS: u32 = 7;
const TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

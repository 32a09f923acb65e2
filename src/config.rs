use std::{env, path::PathBuf, str::FromStr, time::Duration};

use url::Url;

use crate::{
    Error, Result, FILE_PREFIX, LISTING_URL, OUTPUT_DIR, TIMEOUT_SECS, USER_AGENT, WINDOW_DAYS,
};

/// Run configuration. Every field has a default so a plain `Config::default()` scrapes the
/// usual listing page.
#[derive(Debug, Clone)]
pub struct Config {
    pub listing_url: Url,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub window_days: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: Url::parse(LISTING_URL).expect("LISTING_URL constant is a valid URL"),
            output_dir: PathBuf::from(OUTPUT_DIR),
            file_prefix: FILE_PREFIX.to_string(),
            window_days: WINDOW_DAYS,
            timeout: Duration::from_secs(TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads an optional `.env` file and overrides the defaults with any `SCRAP_*` variables
    /// that are set.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Some(url) = var("SCRAP_LISTING_URL") {
            config.listing_url = Url::parse(&url)
                .map_err(|e| Error::Config(format!("SCRAP_LISTING_URL {url:?}: {e}")))?;
        }
        if let Some(dir) = var("SCRAP_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = var("SCRAP_FILE_PREFIX") {
            config.file_prefix = prefix;
        }
        if let Some(days) = parsed_var("SCRAP_WINDOW_DAYS")? {
            config.window_days = days;
        }
        if let Some(secs) = parsed_var("SCRAP_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = var("SCRAP_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    /// Scheme + host of the listing page, relative event links are resolved against it.
    pub fn origin(&self) -> Result<Url> {
        origin_of(&self.listing_url)
    }
}

pub(crate) fn origin_of(url: &Url) -> Result<Url> {
    let origin = url.origin().ascii_serialization();
    Url::parse(&origin).map_err(|_| Error::Config(format!("{url} has no usable origin")))
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("{key} must be a number, got {raw:?}: {e}")))
        })
        .transpose()
}

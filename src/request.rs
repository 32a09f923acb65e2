use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::config::Config;
use crate::record::RawPage;
use crate::{Error, Result};

/// One client per run, carrying the user agent and the request timeout.
pub fn build_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Requests the listing page and returns its HTML.
/// Any transport error or non-success status fails the whole run.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<RawPage> {
    info!(%url, "fetching listing page");

    let res = client.get(url.clone()).send().await.map_err(|e| {
        error!(%url, error = %e, "fetch failed");
        Error::Fetch(e)
    })?;

    let status = res.status();
    if !status.is_success() {
        error!(%url, %status, "listing page returned an error status");
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    // After redirects, relative links resolve against where we ended up.
    let final_url = res.url().clone();
    let html = res.text().await?;
    info!(url = %final_url, bytes = html.len(), "fetched listing page");
    Ok(RawPage {
        url: final_url,
        html,
    })
}

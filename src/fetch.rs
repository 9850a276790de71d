use crate::config::FeedConfig;
use crate::error::{CrawlerError, Result};
use tracing::{debug, info};

/// Performs the blocking-for-this-cycle GET against the feed endpoint.
///
/// Transport failures and non-success statuses are fatal for the cycle; the
/// caller must not write any output when this returns an error.
pub async fn fetch_feed(config: &FeedConfig) -> Result<String> {
    info!("Fetching IOC feed from {}", config.feed_url);

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;

    let response = client.get(&config.feed_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlerError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    debug!("Fetched {} bytes of feed text", body.len());
    Ok(body)
}

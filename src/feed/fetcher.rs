use crate::core::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Date format of the `date` query parameter and of the feed's own date stamp.
pub const FEED_DATE_FORMAT: &str = "%d.%m.%Y";

/// Source of raw feed text.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the feed published for `date`, or the latest one when `None`.
    async fn fetch(&self, date: Option<NaiveDate>) -> Result<String, FetchError>;
}

/// Fetches the daily table over HTTP. Every call hits the network; nothing is cached.
pub struct CnbFeedFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl CnbFeedFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid feed URL: {base_url}"))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("cnbsync/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CnbFeedFetcher { base_url, client })
    }

    fn target(&self, date: Option<NaiveDate>) -> Url {
        let mut url = self.base_url.clone();
        if let Some(date) = date {
            url.query_pairs_mut()
                .append_pair("date", &date.format(FEED_DATE_FORMAT).to_string());
        }
        url
    }
}

#[async_trait]
impl FeedSource for CnbFeedFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, date: Option<NaiveDate>) -> Result<String, FetchError> {
        let url = self.target(date);
        let target = url.to_string();
        debug!("Requesting rate feed from {}", target);

        let response = self.client.get(url).send().await.map_err(|source| {
            error!(%target, error = %source, "Feed request failed");
            FetchError::Transport {
                target: target.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%target, %status, "Feed request returned an error status");
            return Err(FetchError::Status { status, target });
        }

        response.text().await.map_err(|source| {
            error!(%target, error = %source, "Failed to read feed body");
            FetchError::Transport { target, source }
        })
    }
}

use feed_rs::parser;
use reqwest::Client;
use tracing::info;

use crate::config::FeedConfig;
use crate::error::FetchError;
use crate::feed::{entries_from_feed, NewsEntry};
use crate::query::QueryEncoder;

pub struct Fetcher {
    client: Client,
    encoder: QueryEncoder,
}

impl Fetcher {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            encoder: QueryEncoder::new(config),
        })
    }

    /// Fetch and parse the search feed for `query`. Entries keep feed order.
    pub async fn fetch(&self, query: &str) -> Result<Vec<NewsEntry>, FetchError> {
        let url = self.encoder.search_url(query);
        info!("Fetching news for '{}' ({})", query, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = response.bytes().await?;

        let parsed = parser::parse(&bytes[..])?;
        let entries = entries_from_feed(&parsed);

        info!("Fetched {} entries for '{}'", entries.len(), query);
        Ok(entries)
    }
}

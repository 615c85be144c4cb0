use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::FetchError;
use crate::feed::NewsEntry;
use crate::fetcher::Fetcher;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub entries: Vec<NewsEntry>,
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Fresh until `now` exceeds `fetched_at + ttl`.
    pub fn is_fresh_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) <= ttl
    }
}

/// Read-through cache in front of the fetcher, keyed by the exact query string.
///
/// The lock is released while fetching, so two simultaneous misses on the same
/// query both go to the network and the later write wins.
pub struct FeedCache {
    fetcher: Fetcher,
    ttl: Duration,
    slots: RwLock<HashMap<String, CacheEntry>>,
}

impl FeedCache {
    pub fn new(fetcher: Fetcher, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_entries(&self, query: &str) -> Result<Vec<NewsEntry>, FetchError> {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(query) {
                if slot.is_fresh_at(Instant::now(), self.ttl) {
                    debug!("Cache hit for '{}'", query);
                    return Ok(slot.entries.clone());
                }
            }
        }

        debug!("Cache miss for '{}'", query);
        let entries = self.fetcher.fetch(query).await?;

        let now = Instant::now();
        let mut slots = self.slots.write().await;
        // Expired slots for other queries are dropped here, not on read
        slots.retain(|_, slot| slot.is_fresh_at(now, self.ttl));
        slots.insert(
            query.to_string(),
            CacheEntry {
                entries: entries.clone(),
                fetched_at: now,
            },
        );

        Ok(entries)
    }
}

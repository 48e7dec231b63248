//! Price lists fetched over HTTP, cached for a fixed time-to-live

use super::{PriceList, PriceSource};
use crate::error::{FinderError, Result};
use crate::models::{CardRequestLine, PriceQuote};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const USER_AGENT: &str = "optcg_price_finder/0.1";

struct CachedList {
    list: Arc<PriceList>,
    /// Last fetch attempt, successful or not
    checked: Instant,
}

/// Remote price list, re-fetched once the cached copy is older than the TTL
pub struct HttpPriceSource {
    url: String,
    client: reqwest::Client,
    ttl: Duration,
    cache: RwLock<Option<CachedList>>,
}

impl HttpPriceSource {
    pub fn new(url: &str, ttl: Duration, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.to_string(),
            client,
            ttl,
            cache: RwLock::new(None),
        })
    }

    /// Fetch and parse the list, bypassing the cache
    pub async fn fetch(&self) -> Result<PriceList> {
        log::info!("Fetching price list from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FinderError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let list = PriceList::from_json(&body)?;

        log::info!(
            "Fetched {} prices for {} (at {})",
            list.len(),
            list.store(),
            list.loaded_at().format("%Y-%m-%d %H:%M:%S")
        );
        Ok(list)
    }

    /// Cached list if still fresh, otherwise a new fetch.
    /// A failed refresh falls back to the stale copy when there is one and
    /// waits a full TTL before trying upstream again.
    pub async fn current_list(&self) -> Result<Arc<PriceList>> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.checked.elapsed() < self.ttl {
                    return Ok(Arc::clone(&cached.list));
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref() {
            if cached.checked.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.list));
            }
        }

        match self.fetch().await {
            Ok(list) => {
                let list = Arc::new(list);
                *cache = Some(CachedList {
                    list: Arc::clone(&list),
                    checked: Instant::now(),
                });
                Ok(list)
            }
            Err(e) => match cache.as_mut() {
                Some(stale) => {
                    log::warn!("Refresh of {} failed, serving stale list: {}", self.url, e);
                    stale.checked = Instant::now();
                    Ok(Arc::clone(&stale.list))
                }
                None => Err(e),
            },
        }
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn quotes(&self, cards: &[CardRequestLine]) -> Result<Vec<(String, PriceQuote)>> {
        let list = self.current_list().await?;
        Ok(list.quotes_for(cards))
    }
}

//! Price finders: turn the pasted card list into best prices
//!
//! `FixedPriceFinder` answers every search with the same two quotes and is
//! what runs when no price source is configured. `BestPriceFinder` does the
//! real lookup across the configured sources.

use crate::card_list::parse_card_list;
use crate::error::{FinderError, Result};
use crate::models::{PriceQuote, SearchResult};
use crate::sources::PriceSource;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Looks up best prices for a free-text card list
#[async_trait]
pub trait PriceFinder: Send + Sync {
    /// Short identifier reported by the health endpoint
    fn name(&self) -> &'static str;

    async fn find(&self, cards: &str) -> Result<SearchResult>;
}

/// Stub finder: ignores the card list and returns fixed quotes
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPriceFinder;

impl FixedPriceFinder {
    pub fn result() -> SearchResult {
        let mut result = SearchResult::new();
        result.offer(
            "OP07-079",
            PriceQuote {
                store: "Cherry Collectables".to_string(),
                price: 3.95,
            },
        );
        result.offer(
            "OP02-096",
            PriceQuote {
                store: "Card Bot".to_string(),
                price: 2.50,
            },
        );
        result
    }
}

#[async_trait]
impl PriceFinder for FixedPriceFinder {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn find(&self, _cards: &str) -> Result<SearchResult> {
        Ok(Self::result())
    }
}

/// Lowest price per card across every configured source
pub struct BestPriceFinder {
    sources: Vec<Arc<dyn PriceSource>>,
}

impl BestPriceFinder {
    pub fn new(sources: Vec<Arc<dyn PriceSource>>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl PriceFinder for BestPriceFinder {
    fn name(&self) -> &'static str {
        "best_price"
    }

    async fn find(&self, cards: &str) -> Result<SearchResult> {
        let parsed = parse_card_list(cards);
        for (line, err) in &parsed.errors {
            log::warn!("Skipping card list line {}: {}", line, err);
        }

        let mut result = SearchResult::new();
        if parsed.is_empty() || self.sources.is_empty() {
            return Ok(result);
        }

        let lookups = self
            .sources
            .iter()
            .map(|source| source.quotes(&parsed.cards));
        let responses = join_all(lookups).await;

        let mut failed = 0;
        let mut quoted: Vec<HashMap<String, PriceQuote>> = Vec::with_capacity(responses.len());
        for (source, response) in self.sources.iter().zip(responses) {
            match response {
                Ok(quotes) => {
                    log::debug!("{} quoted {} card(s)", source.name(), quotes.len());
                    quoted.push(quotes.into_iter().collect());
                }
                Err(e) => {
                    log::warn!("Price source {} failed: {}", source.name(), e);
                    failed += 1;
                }
            }
        }

        if failed == self.sources.len() {
            return Err(FinderError::AllSourcesFailed(failed));
        }

        // Cards in pasted order, sources in configuration order so ties go to the earlier one
        for card in &parsed.cards {
            for quotes in &quoted {
                if let Some(quote) = quotes.get(&card.card_id) {
                    result.offer(&card.card_id, quote.clone());
                }
            }
        }

        log::info!(
            "Found prices for {} of {} card(s)",
            result.len(),
            parsed.cards.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;

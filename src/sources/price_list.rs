//! Store price list parsing and the file-backed source

use super::PriceSource;
use crate::card_list::normalize_card_id;
use crate::error::{FinderError, Result};
use crate::models::{CardRequestLine, PriceQuote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Price list file structure
///
/// ```json
/// {"store": "Card Bot", "prices": {"OP02-096": 2.5}}
/// ```
#[derive(Debug, Deserialize)]
struct PriceListFile {
    store: String,
    prices: HashMap<String, f64>,
}

/// One store's prices, keyed by normalized card identifier
#[derive(Debug, Clone)]
pub struct PriceList {
    store: String,
    prices: HashMap<String, f64>,
    loaded_at: DateTime<Utc>,
}

impl PriceList {
    /// Load a price list from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading price list from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a price list from JSON text
    ///
    /// Entries with a malformed identifier or an invalid price are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PriceListFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    fn from_file(file: PriceListFile) -> Result<Self> {
        if file.store.trim().is_empty() {
            return Err(FinderError::InvalidQuote(
                "price list has an empty store name".to_string(),
            ));
        }

        let mut prices = HashMap::with_capacity(file.prices.len());
        let mut skipped = 0;
        for (raw_id, price) in file.prices {
            let Some(card_id) = normalize_card_id(&raw_id) else {
                log::warn!("{}: skipping malformed card id {:?}", file.store, raw_id);
                skipped += 1;
                continue;
            };
            if let Err(e) = PriceQuote::new(file.store.as_str(), price) {
                log::warn!("{}: skipping {}: {}", file.store, card_id, e);
                skipped += 1;
                continue;
            }
            prices.insert(card_id, price);
        }

        log::info!(
            "Loaded {} prices for {} ({} skipped)",
            prices.len(),
            file.store,
            skipped
        );

        Ok(Self {
            store: file.store,
            prices,
            loaded_at: Utc::now(),
        })
    }

    /// Look up a price by card identifier (case-insensitive)
    pub fn get(&self, card_id: &str) -> Option<f64> {
        self.prices.get(&card_id.to_ascii_uppercase()).copied()
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// When this list was parsed
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Quotes for every requested card present in this list
    pub fn quotes_for(&self, cards: &[CardRequestLine]) -> Vec<(String, PriceQuote)> {
        cards
            .iter()
            .filter_map(|card| {
                self.get(&card.card_id).map(|price| {
                    (
                        card.card_id.clone(),
                        PriceQuote {
                            store: self.store.clone(),
                            price,
                        },
                    )
                })
            })
            .collect()
    }
}

/// Price list read once from disk at start-up
#[derive(Debug)]
pub struct FilePriceSource {
    list: PriceList,
}

impl FilePriceSource {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            list: PriceList::load(path)?,
        })
    }

    pub fn from_list(list: PriceList) -> Self {
        Self { list }
    }
}

#[async_trait]
impl PriceSource for FilePriceSource {
    fn name(&self) -> &str {
        self.list.store()
    }

    async fn quotes(&self, cards: &[CardRequestLine]) -> Result<Vec<(String, PriceQuote)>> {
        Ok(self.list.quotes_for(cards))
    }
}

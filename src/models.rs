//! Card request and price quote types shared by the finders and the web layer

use crate::error::{FinderError, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One parsed line of the user's card list, e.g. `3xOP02-096`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequestLine {
    pub quantity: u32,
    pub card_id: String,
}

impl CardRequestLine {
    pub fn new(quantity: u32, card_id: impl Into<String>) -> Self {
        Self {
            quantity,
            card_id: card_id.into(),
        }
    }
}

/// A store's price for a single card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub store: String,
    pub price: f64,
}

impl PriceQuote {
    /// Build a quote, rejecting empty store names and negative or non-finite prices
    pub fn new(store: impl Into<String>, price: f64) -> Result<Self> {
        let store = store.into();
        if store.trim().is_empty() {
            return Err(FinderError::InvalidQuote("store name is empty".to_string()));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(FinderError::InvalidQuote(format!(
                "price {} for {} is not a non-negative amount",
                price, store
            )));
        }
        Ok(Self { store, price })
    }
}

/// Best known quote per card identifier
///
/// Serializes as a plain JSON object keyed by card identifier, in the order
/// cards were first offered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    best_prices: Vec<(String, PriceQuote)>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote, keeping it only if it beats the current best.
    ///
    /// Equal prices keep the quote that was offered first.
    pub fn offer(&mut self, card_id: &str, quote: PriceQuote) {
        match self.best_prices.iter_mut().find(|(id, _)| id == card_id) {
            Some((_, best)) if best.price <= quote.price => {}
            Some((_, best)) => *best = quote,
            None => self.best_prices.push((card_id.to_string(), quote)),
        }
    }

    pub fn get(&self, card_id: &str) -> Option<&PriceQuote> {
        self.best_prices
            .iter()
            .find(|(id, _)| id == card_id)
            .map(|(_, quote)| quote)
    }

    pub fn len(&self) -> usize {
        self.best_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_prices.is_empty()
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.best_prices.len()))?;
        for (card_id, quote) in &self.best_prices {
            map.serialize_entry(card_id, quote)?;
        }
        map.end()
    }
}

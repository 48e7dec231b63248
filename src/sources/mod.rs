//! Retailer price sources
//!
//! A source answers "what does this store charge for these cards". Sources are
//! operator-supplied price lists, either a local JSON file or an HTTP URL.

mod http;
mod price_list;

pub use http::HttpPriceSource;
pub use price_list::{FilePriceSource, PriceList};

use crate::error::Result;
use crate::models::{CardRequestLine, PriceQuote};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A store that can quote prices for card identifiers
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Quotes for the requested cards this source knows about.
    /// Unknown cards are simply absent from the returned list.
    async fn quotes(&self, cards: &[CardRequestLine]) -> Result<Vec<(String, PriceQuote)>>;
}

/// Where a price list comes from, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSourceSpec {
    File(PathBuf),
    Http(String),
}

impl PriceSourceSpec {
    /// `http://` and `https://` values are URLs, anything else a file path
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            PriceSourceSpec::Http(value.to_string())
        } else {
            PriceSourceSpec::File(PathBuf::from(value))
        }
    }

    /// Build the source. File sources are read immediately.
    pub fn build(&self, cache_ttl: Duration, timeout: Duration) -> Result<Arc<dyn PriceSource>> {
        match self {
            PriceSourceSpec::File(path) => Ok(Arc::new(FilePriceSource::open(path)?)),
            PriceSourceSpec::Http(url) => Ok(Arc::new(HttpPriceSource::new(url, cache_ttl, timeout)?)),
        }
    }
}

impl std::str::FromStr for PriceSourceSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_parses_urls_and_paths() {
        assert_eq!(
            PriceSourceSpec::parse("https://example.com/prices.json"),
            PriceSourceSpec::Http("https://example.com/prices.json".to_string())
        );
        assert_eq!(
            PriceSourceSpec::parse("http://localhost:9000/list"),
            PriceSourceSpec::Http("http://localhost:9000/list".to_string())
        );
        assert_eq!(
            PriceSourceSpec::parse("./stores/card_bot.json"),
            PriceSourceSpec::File(PathBuf::from("./stores/card_bot.json"))
        );
    }

    #[test]
    fn build_missing_file_fails() {
        let spec = PriceSourceSpec::parse("/nonexistent/path/prices.json");
        let result = spec.build(Duration::from_secs(60), Duration::from_secs(5));
        assert!(result.is_err());
    }
}

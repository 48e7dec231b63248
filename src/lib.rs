//! One Piece TCG Price Finder
//!
//! Small web service: paste a card list, get back the lowest price found for
//! each card across the configured retailer price lists.

pub mod card_list;
pub mod error;
pub mod finder;
pub mod models;
pub mod sources;
pub mod web;

pub use card_list::{parse_card_list, CardListError, ParsedCardList};
pub use error::{FinderError, Result};
pub use finder::{BestPriceFinder, FixedPriceFinder, PriceFinder};
pub use models::{CardRequestLine, PriceQuote, SearchResult};
pub use sources::{FilePriceSource, HttpPriceSource, PriceList, PriceSource, PriceSourceSpec};

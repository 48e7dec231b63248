//! Error types for price lookups

use thiserror::Error;

/// Unified error type for price finder operations
#[derive(Debug, Error)]
pub enum FinderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse a price list
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Price list file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Quote violates the store/price invariants
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),
    /// Every configured price source failed for a search
    #[error("All {0} price source(s) failed")]
    AllSourcesFailed(usize),
}

/// Result alias for price finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

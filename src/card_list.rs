//! Parsing of the pasted card list
//!
//! One card per line, `<quantity>x<card-id>` (e.g. `3xOP02-096`). A bare
//! identifier counts as one copy. Blank lines are ignored.

use crate::models::CardRequestLine;
use thiserror::Error;

/// Why a single line of the card list was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardListError {
    #[error("missing card identifier")]
    EmptyIdentifier,
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("malformed card identifier: {0}")]
    MalformedIdentifier(String),
}

/// Result of parsing a whole card list
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedCardList {
    /// Valid requests in input order, duplicates merged
    pub cards: Vec<CardRequestLine>,
    /// Rejected lines as (1-based line number, reason)
    pub errors: Vec<(usize, CardListError)>,
}

impl ParsedCardList {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.card_id.as_str())
    }
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<CardRequestLine>, CardListError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (quantity, raw_id) = if line.starts_with(|c: char| c.is_ascii_digit()) {
        let split = line
            .find(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| CardListError::InvalidQuantity(line.to_string()))?;
        let raw_qty = line[..split].trim();
        let quantity: u32 = raw_qty
            .parse()
            .map_err(|_| CardListError::InvalidQuantity(raw_qty.to_string()))?;
        (quantity, line[split + 1..].trim())
    } else {
        (1, line)
    };

    if quantity == 0 {
        return Err(CardListError::ZeroQuantity);
    }
    if raw_id.is_empty() {
        return Err(CardListError::EmptyIdentifier);
    }

    let card_id = normalize_card_id(raw_id)
        .ok_or_else(|| CardListError::MalformedIdentifier(raw_id.to_string()))?;

    Ok(Some(CardRequestLine::new(quantity, card_id)))
}

/// Parse a full card list, merging repeated identifiers
pub fn parse_card_list(text: &str) -> ParsedCardList {
    let mut parsed = ParsedCardList::default();

    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(card)) => {
                match parsed.cards.iter_mut().find(|c| c.card_id == card.card_id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(card.quantity)
                    }
                    None => parsed.cards.push(card),
                }
            }
            Ok(None) => {}
            Err(e) => parsed.errors.push((idx + 1, e)),
        }
    }

    parsed
}

/// Upper-case and validate a `<SET>-<NUMBER>` identifier
pub fn normalize_card_id(raw: &str) -> Option<String> {
    let id = raw.trim().to_ascii_uppercase();
    let (set, number) = id.split_once('-')?;

    let set_ok = (1..=5).contains(&set.len()) && set.chars().all(|c| c.is_ascii_alphanumeric());
    let number_ok =
        (1..=4).contains(&number.len()) && number.chars().all(|c| c.is_ascii_digit());

    if set_ok && number_ok {
        Some(id)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "card_list_tests.rs"]
mod tests;

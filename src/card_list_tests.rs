//! Tests for card list parsing

use super::*;

// ── parse_line ───────────────────────────────────────────────────────

#[test]
fn parses_quantity_and_identifier() {
    let card = parse_line("3xOP02-096").unwrap().unwrap();
    assert_eq!(card, CardRequestLine::new(3, "OP02-096"));
}

#[test]
fn accepts_uppercase_separator_and_spacing() {
    let card = parse_line("  2 X st06-010  ").unwrap().unwrap();
    assert_eq!(card.quantity, 2);
    assert_eq!(card.card_id, "ST06-010");
}

#[test]
fn bare_identifier_counts_as_one() {
    let card = parse_line("OP07-079").unwrap().unwrap();
    assert_eq!(card, CardRequestLine::new(1, "OP07-079"));
}

#[test]
fn promo_identifiers_are_valid() {
    assert_eq!(parse_line("1xP-001").unwrap().unwrap().card_id, "P-001");
    assert_eq!(
        parse_line("1xPRB01-001").unwrap().unwrap().card_id,
        "PRB01-001"
    );
}

#[test]
fn blank_line_is_skipped() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   \t"), Ok(None));
}

#[test]
fn zero_quantity_is_rejected() {
    assert_eq!(parse_line("0xOP07-079"), Err(CardListError::ZeroQuantity));
}

#[test]
fn non_numeric_quantity_is_rejected() {
    assert_eq!(
        parse_line("1.5xOP07-079"),
        Err(CardListError::InvalidQuantity("1.5".to_string()))
    );
}

#[test]
fn missing_separator_is_rejected() {
    match parse_line("3 OP07-079") {
        Err(CardListError::InvalidQuantity(_)) => {}
        other => panic!("Expected InvalidQuantity, got: {other:?}"),
    }
}

#[test]
fn missing_identifier_is_rejected() {
    assert_eq!(parse_line("4x"), Err(CardListError::EmptyIdentifier));
}

#[test]
fn malformed_identifier_is_rejected() {
    for line in ["1xOP07079", "1xOP07-", "1xTOOLONG-001", "1xOP07-12345", "Lightning Bolt"] {
        match parse_line(line) {
            Err(CardListError::MalformedIdentifier(_)) => {}
            other => panic!("Expected MalformedIdentifier for {line:?}, got: {other:?}"),
        }
    }
}

// ── parse_card_list ──────────────────────────────────────────────────

#[test]
fn parses_example_list_in_order() {
    let parsed = parse_card_list("1xOP07-079\n3xOP02-096\n2xST06-010");

    assert!(parsed.errors.is_empty());
    let ids: Vec<&str> = parsed.card_ids().collect();
    assert_eq!(ids, vec!["OP07-079", "OP02-096", "ST06-010"]);
    assert_eq!(parsed.cards[1].quantity, 3);
}

#[test]
fn handles_crlf_and_blank_lines() {
    let parsed = parse_card_list("1xOP07-079\r\n\r\n2xST06-010\r\n");
    assert_eq!(parsed.cards.len(), 2);
    assert!(parsed.errors.is_empty());
}

#[test]
fn merges_duplicates_keeping_first_position() {
    let parsed = parse_card_list("1xOP07-079\n2xST06-010\n3xop07-079");

    assert_eq!(parsed.cards.len(), 2);
    assert_eq!(parsed.cards[0], CardRequestLine::new(4, "OP07-079"));
    assert_eq!(parsed.cards[1], CardRequestLine::new(2, "ST06-010"));
}

#[test]
fn reports_bad_lines_with_line_numbers() {
    let parsed = parse_card_list("1xOP07-079\n\n0xOP02-096\nnonsense\n2xST06-010");

    assert_eq!(parsed.cards.len(), 2);
    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(parsed.errors[0], (3, CardListError::ZeroQuantity));
    assert_eq!(parsed.errors[1].0, 4);
}

#[test]
fn empty_input_parses_to_nothing() {
    let parsed = parse_card_list("");
    assert!(parsed.is_empty());
    assert!(parsed.errors.is_empty());
}

// ── normalize_card_id ────────────────────────────────────────────────

#[test]
fn normalize_uppercases() {
    assert_eq!(normalize_card_id("eb01-012"), Some("EB01-012".to_string()));
    assert_eq!(normalize_card_id("-001"), None);
    assert_eq!(normalize_card_id("OP-07-079"), None);
}

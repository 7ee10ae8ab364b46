/// Unit tests for the card expiry composition sent to the gateway
///
/// A 4-digit expiry year keeps only its last two digits, short years pass
/// through unchanged, and month and year are zero padded into `MMYY`.
use proptest::prelude::*;

use payknox::modules::payments::services::processor::{card_expiry, two_digit_expiry_year};

#[test]
fn test_four_digit_year_keeps_last_two_digits() {
    assert_eq!(two_digit_expiry_year(2025), 25);
    assert_eq!(two_digit_expiry_year(2030), 30);
    assert_eq!(two_digit_expiry_year(2100), 0);
}

#[test]
fn test_short_years_pass_through() {
    assert_eq!(two_digit_expiry_year(99), 99);
    assert_eq!(two_digit_expiry_year(27), 27);
    assert_eq!(two_digit_expiry_year(5), 5);
    assert_eq!(two_digit_expiry_year(0), 0);
}

#[test]
fn test_expiry_is_zero_padded_mmyy() {
    assert_eq!(card_expiry(2, 2026), "0226");
    assert_eq!(card_expiry(11, 2030), "1130");
    assert_eq!(card_expiry(1, 5), "0105");
    assert_eq!(card_expiry(12, 99), "1299");
    assert_eq!(card_expiry(6, 2100), "0600");
}

proptest! {
    #[test]
    fn test_truncated_year_is_modulo_100(year in 100u32..10_000u32) {
        prop_assert_eq!(two_digit_expiry_year(year), year % 100);
    }

    #[test]
    fn test_expiry_always_four_digits(month in 1u32..=12u32, year in 0u32..10_000u32) {
        let expiry = card_expiry(month, year);
        prop_assert_eq!(expiry.len(), 4);
        prop_assert!(expiry.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_month_survives_composition(month in 1u32..=12u32, year in 2024u32..2100u32) {
        let expiry = card_expiry(month, year);
        prop_assert_eq!(expiry[..2].parse::<u32>().unwrap(), month);
        prop_assert_eq!(expiry[2..].parse::<u32>().unwrap(), year % 100);
    }
}

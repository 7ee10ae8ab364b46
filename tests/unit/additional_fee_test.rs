/// Unit tests for additional handling fee calculation
///
/// A non-positive fee always yields zero, a fixed fee ignores the cart
/// total, and a percentage fee scales with it.
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use payknox::modules::payments::services::processor::calculate_additional_fee;

#[test]
fn test_fixed_fee_ignores_cart_total() {
    assert_eq!(
        calculate_additional_fee(dec!(200.00), dec!(5.00), false),
        dec!(5.00)
    );
    assert_eq!(
        calculate_additional_fee(dec!(9.99), dec!(5.00), false),
        dec!(5.00)
    );
}

#[test]
fn test_percentage_fee_scales_with_cart_total() {
    assert_eq!(
        calculate_additional_fee(dec!(200.00), dec!(10), true),
        dec!(20.00)
    );
    assert_eq!(
        calculate_additional_fee(dec!(149.99), dec!(5), true),
        dec!(7.4995)
    );
}

#[test]
fn test_zero_or_negative_fee_yields_zero() {
    assert_eq!(
        calculate_additional_fee(dec!(200.00), Decimal::ZERO, false),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_additional_fee(dec!(200.00), Decimal::ZERO, true),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_additional_fee(dec!(200.00), dec!(-3.50), false),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_additional_fee(dec!(200.00), dec!(-10), true),
        Decimal::ZERO
    );
}

proptest! {
    #[test]
    fn test_fixed_fee_is_the_configured_amount(
        total_cents in 0u64..10_000_000u64,
        fee_cents in 1u64..100_000u64,
    ) {
        let total = Decimal::new(total_cents as i64, 2);
        let fee = Decimal::new(fee_cents as i64, 2);
        prop_assert_eq!(calculate_additional_fee(total, fee, false), fee);
    }

    #[test]
    fn test_percentage_fee_matches_exact_fraction(
        total_cents in 0u64..10_000_000u64,
        percent in 1u32..100u32,
    ) {
        let total = Decimal::new(total_cents as i64, 2);
        let fee = Decimal::from(percent);
        let expected = total * fee / dec!(100);
        prop_assert_eq!(calculate_additional_fee(total, fee, true), expected);
    }

    #[test]
    fn test_non_positive_fee_never_charges(
        total_cents in 0u64..10_000_000u64,
        fee_cents in 0i64..100_000i64,
        use_percentage in proptest::bool::ANY,
    ) {
        let total = Decimal::new(total_cents as i64, 2);
        let fee = Decimal::new(-fee_cents, 2);
        prop_assert_eq!(
            calculate_additional_fee(total, fee, use_percentage),
            Decimal::ZERO
        );
    }
}

//! Property-based tests for rate normalization and offer averaging.

use madurodolar_rates::models::{AdvDetail, Offer};
use madurodolar_rates::normalize::normalize_rate;
use madurodolar_rates::shaper::average_offer_price;
use madurodolar_rates::{RateValue, RatesError};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

/// Render `int` with `.` grouping thousands, e.g. 174231 → "174.231".
fn group_thousands(int: u64) -> String {
    let digits = int.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn offer(price: f64) -> Offer {
    Offer {
        adv: AdvDetail {
            price: RateValue::Number(price),
        },
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Locale-formatted strings normalize to the same value as their plain form.
    #[test]
    fn prop_locale_format_matches_plain_format(int in 0u64..100_000_000, cents in 0u32..100) {
        let locale = format!("{},{:02}", group_thousands(int), cents);
        let plain: f64 = format!("{}.{:02}", int, cents).parse().unwrap();

        prop_assert_eq!(normalize_rate(&locale).unwrap(), plain);
    }

    /// Whatever the input, the normalizer never yields NaN or infinity.
    #[test]
    fn prop_normalizer_never_returns_non_finite(raw in ".*") {
        match normalize_rate(&raw) {
            Ok(value) => prop_assert!(value.is_finite()),
            Err(err) => prop_assert!(matches!(err, RatesError::Parse(_))),
        }
    }

    /// The average of a non-empty offer list is a two-decimal number, never "NaN".
    #[test]
    fn prop_average_is_two_decimal_string(prices in proptest::collection::vec(0.01f64..1_000_000.0, 1..20)) {
        let offers: Vec<Offer> = prices.iter().copied().map(offer).collect();
        let average = average_offer_price(&offers).unwrap();

        prop_assert_ne!(average.as_str(), "NaN");
        let (_, decimals) = average.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);

        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        prop_assert_eq!(average, format!("{:.2}", mean));
    }

    /// Averaging is deterministic.
    #[test]
    fn prop_average_is_idempotent(prices in proptest::collection::vec(0.01f64..1_000_000.0, 1..20)) {
        let offers: Vec<Offer> = prices.iter().copied().map(offer).collect();
        prop_assert_eq!(average_offer_price(&offers).unwrap(), average_offer_price(&offers).unwrap());
    }
}

#[test]
fn empty_offer_list_is_shape_error() {
    assert!(matches!(average_offer_price(&[]), Err(RatesError::Shape(_))));
}

#[test]
fn group_thousands_examples() {
    assert_eq!(group_thousands(174231), "174.231");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1234567), "1.234.567");
}

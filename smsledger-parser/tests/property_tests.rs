//! Property-based tests for the parsing engine.
//!
//! Run with: cargo test -p smsledger-parser --test `property_tests`

use proptest::prelude::*;
use smsledger_parser::{normalize, pad_currency, parse};

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = String> {
    (0u64..10_000_000, prop::option::of("[0-9]{0,2}")).prop_map(|(whole, fraction)| {
        match fraction {
            Some(fraction) => format!("{whole}.{fraction}"),
            None => whole.to_string(),
        }
    })
}

/// Words with no digits and no currency, account or balance markers, so
/// none of the three signals can be produced from them
fn arb_verb_soup() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "debited", "credited", "payment", "spent", "refund", "received", "charged",
            "deducted", "paid", "hello", "your", "at", "shop", "on", "the", "via", "upi",
        ]),
        0..12,
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_padding_has_two_decimals(amount in arb_amount()) {
        let padded = pad_currency(&amount);
        let (_, fraction) = padded.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(
            padded.parse::<f64>().unwrap(),
            amount.trim_end_matches('.').parse::<f64>().unwrap()
        );
    }

    #[test]
    fn prop_account_number_is_masked(number in "[1-9][0-9]{3,15}") {
        let info = parse(&format!("Rs 100 debited from A/c {number}"));
        let expected = &number[number.len() - 4..];
        prop_assert_eq!(info.account.number.as_deref(), Some(expected));
    }

    #[test]
    fn prop_type_needs_two_signals(words in arb_verb_soup(), with_amount in any::<bool>()) {
        let mut message = words.join(" ");
        if with_amount {
            message.push_str(" Rs 250");
        }
        let info = parse(&message);
        prop_assert_eq!(info.transaction.kind, None);
    }
}

#[test]
fn test_normalization_is_stable_on_real_messages() {
    let samples = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("samples")
        .join("messages.txt");
    let text = std::fs::read_to_string(samples).unwrap();

    for message in text.lines().filter(|l| !l.trim().is_empty()) {
        let once = normalize(message);
        let twice = normalize(&once.join(" "));
        assert_eq!(once, twice, "{message}");
    }
}

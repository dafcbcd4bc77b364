//! # Property-Based Tests
//!
//! Invariants of `truePercentage` parsing and of the signal outputs, checked
//! with proptest.

use coop_example_core::{
    CoopIntegrationExample, InMemoryCredentials, IntegrationPlugin, OrgConfig,
    PluginSignalContext, SeededRandom, SignalInput, has_true_percentage_config,
    parse_true_percentage, primitives::INTEGRATION_ID,
};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

fn config_with(value: Value) -> OrgConfig {
    let mut config = OrgConfig::new();
    config.insert("truePercentage".to_string(), value);
    config
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

// =============================================================================
// CONFIG PARSING PROPERTIES
// =============================================================================

proptest! {
    /// In-range numbers parse to themselves.
    #[test]
    fn in_range_numbers_round_trip(n in 0.0f64..=100.0) {
        prop_assert_eq!(parse_true_percentage(&config_with(json!(n))), n);
    }

    /// In-range numbers given as strings parse to the same value.
    #[test]
    fn in_range_numeric_strings_parse(n in 0u32..=100, pad in "[ \t]{0,3}") {
        let raw = format!("{pad}{n}{pad}");
        prop_assert_eq!(parse_true_percentage(&config_with(json!(raw))), f64::from(n));
    }

    /// Negative numbers clamp to 0.
    #[test]
    fn negatives_clamp_to_zero(n in -1.0e12f64..-1.0e-9) {
        prop_assert_eq!(parse_true_percentage(&config_with(json!(n))), 0.0);
    }

    /// Numbers above 100 clamp to 100.
    #[test]
    fn large_values_clamp_to_hundred(n in 100.000_001f64..1.0e12) {
        prop_assert_eq!(parse_true_percentage(&config_with(json!(n))), 100.0);
    }

    /// Byte order marks around a number are trimmed like white space.
    #[test]
    fn byte_order_marks_are_trimmed(n in 0u32..=100, boms in 1usize..3) {
        let bom = "\u{feff}".repeat(boms);
        let raw = format!("{bom}{n} {bom}");
        prop_assert_eq!(parse_true_percentage(&config_with(json!(raw))), f64::from(n));
    }

    /// A sign after a radix prefix is never numeric.
    #[test]
    fn signed_radix_digits_default(prefix in "0[xXoObB]", sign in "[+-]", digits in "[01]{1,6}") {
        let raw = format!("{prefix}{sign}{digits}");
        prop_assert_eq!(parse_true_percentage(&config_with(json!(raw))), 50.0);
    }

    /// Alphabetic garbage always yields the default.
    #[test]
    fn non_numeric_strings_default(s in "[g-zG-Z][a-zA-Z ]{0,12}") {
        prop_assert_eq!(parse_true_percentage(&config_with(json!(s))), 50.0);
    }

    /// Whatever the input, the parsed value lies in [0, 100].
    #[test]
    fn parsed_value_always_in_bounds(s in ".{0,20}") {
        let parsed = parse_true_percentage(&config_with(json!(s)));
        prop_assert!((0.0..=100.0).contains(&parsed));
    }

    /// Presence is exactly "non-blank after trimming" for string values.
    #[test]
    fn presence_matches_trimmed_emptiness(s in "[ \t0-9a-z]{0,8}") {
        let present = has_true_percentage_config(Some(&config_with(json!(s.clone()))));
        prop_assert_eq!(present, !s.trim().is_empty());
    }
}

// =============================================================================
// SIGNAL PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Random scores stay in [0, 100) for any seed.
    #[test]
    fn random_score_in_range(seed in any::<u64>()) {
        let context = PluginSignalContext::new(INTEGRATION_ID, Arc::new(InMemoryCredentials::new()))
            .with_random(Arc::new(SeededRandom::new(seed)));
        let signals = CoopIntegrationExample.create_signals(&context);
        let score_signal = &signals[1].signal;

        for _ in 0..16 {
            let output = block_on(score_signal.run(&SignalInput::default())).expect("run");
            let score = output.score.as_f64().expect("numeric score");
            prop_assert!((0.0..100.0).contains(&score));
        }
    }

    /// Disabled iff the org has no non-blank truePercentage.
    #[test]
    fn disabled_iff_unconfigured(raw in prop::option::of("[ 0-9]{0,4}")) {
        let store = InMemoryCredentials::new();
        if let Some(raw) = &raw {
            store.insert("acme", config_with(json!(raw)));
        }
        let context = PluginSignalContext::new(INTEGRATION_ID, Arc::new(store));
        let signals = CoopIntegrationExample.create_signals(&context);

        let info = block_on(signals[0].signal.disabled_info("acme")).expect("disabled info");
        let configured = raw.as_deref().is_some_and(|r| !r.trim().is_empty());
        prop_assert_eq!(info.disabled, !configured);
    }
}

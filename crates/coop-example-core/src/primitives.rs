//! # Plugin Primitives
//!
//! Hardcoded identifiers and defaults for the COOP integration example.
//!
//! These values are part of the contract with the host: signal type ids and
//! the integration id are referenced by saved rules, so they must never change.

/// Identifier of this integration in the host's integration registry.
pub const INTEGRATION_ID: &str = "COOP_INTEGRATION_EXAMPLE";

/// Human-readable integration name, shared by the manifest and the model card.
pub const INTEGRATION_NAME: &str = "COOP Integration Example";

/// Manifest and model card version.
pub const PLUGIN_VERSION: &str = "1.0.0";

/// Signal type id of the config-driven boolean signal.
pub const SIGNAL_TYPE_RANDOM_SELECTION: &str = "RANDOM_SIGNAL_SELECTION";

/// Signal type id of the numeric score signal.
pub const SIGNAL_TYPE_RANDOM_SCORE: &str = "RANDOM_SCORE";

/// Org config key holding the probability (0–100) that the boolean signal returns true.
pub const TRUE_PERCENTAGE_KEY: &str = "truePercentage";

/// Probability used when `truePercentage` is missing or unparseable.
pub const DEFAULT_TRUE_PERCENTAGE: f64 = 50.0;

/// Lower clamp bound for `truePercentage`.
pub const MIN_TRUE_PERCENTAGE: f64 = 0.0;

/// Upper clamp bound for `truePercentage`.
pub const MAX_TRUE_PERCENTAGE: f64 = 100.0;

/// `RANDOM_SCORE` draws are scaled from `[0, 1)` onto `[0, SCORE_SCALE)`.
pub const SCORE_SCALE: f64 = 100.0;

/// Recommended high-precision and high-recall threshold for both signals.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Documentation link published in the manifest.
pub const DOCS_URL: &str = "https://github.com/roostorg/coop/tree/main/coop-integration-example";

/// Message shown by the host while the boolean signal is not configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Configure the integration (True percentage 0–100) in Org settings to use this signal.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_type_ids_are_distinct() {
        assert_ne!(SIGNAL_TYPE_RANDOM_SELECTION, SIGNAL_TYPE_RANDOM_SCORE);
    }

    #[test]
    fn default_true_percentage_within_bounds() {
        assert!((MIN_TRUE_PERCENTAGE..=MAX_TRUE_PERCENTAGE).contains(&DEFAULT_TRUE_PERCENTAGE));
    }

    #[test]
    fn score_scale_spans_percentages() {
        assert_eq!(SCORE_SCALE, MAX_TRUE_PERCENTAGE);
    }
}

//! # Host Contract Types
//!
//! This module contains the data shapes exchanged with the Coop host:
//! - Signal identity and output typing (`SignalTypeId`, `SignalId`, `OutputType`)
//! - Descriptor metadata (`RecommendedThresholds`, `SupportedLanguages`, `PricingStructure`)
//! - Invocation payloads (`SignalInput`, `SignalOutput`, `DisabledInfo`)
//! - Error types (`CoopError`)
//!
//! ## Wire Format
//!
//! All structs serialize with camelCase field names and SCREAMING_SNAKE_CASE
//! enum tags, matching the JSON the host expects from plugins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Per-organization integration settings, as stored by the host.
///
/// Read-only from the plugin's perspective.
pub type OrgConfig = serde_json::Map<String, Value>;

// =============================================================================
// SIGNAL IDENTITY
// =============================================================================

/// Identifier of a signal type, e.g. `RANDOM_SCORE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalTypeId(pub String);

impl SignalTypeId {
    /// Create a new signal type id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignalTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `id` object of a signal descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalId {
    #[serde(rename = "type")]
    pub signal_type: SignalTypeId,
}

impl SignalId {
    #[must_use]
    pub fn new(signal_type: impl Into<String>) -> Self {
        Self {
            signal_type: SignalTypeId::new(signal_type),
        }
    }
}

// =============================================================================
// OUTPUT TYPING
// =============================================================================

/// Scalar type of a signal's score.
///
/// The host uses a BOOLEAN score as-is for a rule condition and compares a
/// NUMBER score against the threshold set in the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScalarType {
    Boolean,
    Number,
}

/// Output type declaration, `{ "scalarType": "BOOLEAN" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputType {
    pub scalar_type: ScalarType,
}

impl OutputType {
    pub const BOOLEAN: Self = Self {
        scalar_type: ScalarType::Boolean,
    };

    pub const NUMBER: Self = Self {
        scalar_type: ScalarType::Number,
    };
}

// =============================================================================
// DESCRIPTOR METADATA
// =============================================================================

/// Thresholds the host suggests when a rule author picks this signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedThresholds {
    pub high_precision_threshold: f64,
    pub high_recall_threshold: f64,
}

/// Marker serialized as the literal `"ALL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllLanguages {
    #[serde(rename = "ALL")]
    All,
}

/// Languages a signal can score: every language, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportedLanguages {
    All(AllLanguages),
    Only(Vec<String>),
}

impl SupportedLanguages {
    pub const ALL: Self = Self::All(AllLanguages::All);

    /// Whether content in `language` may be sent to the signal.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        match self {
            Self::All(_) => true,
            Self::Only(languages) => languages.iter().any(|l| l == language),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType {
    Free,
}

/// `{ "type": "FREE" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingStructure {
    #[serde(rename = "type")]
    pub pricing_type: PricingType,
}

impl PricingStructure {
    pub const FREE: Self = Self {
        pricing_type: PricingType::Free,
    };
}

/// Item kinds the host may route to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibleInput {
    String,
    Image,
    FullItem,
}

// =============================================================================
// INVOCATION PAYLOADS
// =============================================================================

/// Input handed to `run`.
///
/// The host passes an untyped value; the only field this plugin reads is
/// `orgId`, and only when it is a JSON string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalInput {
    pub org_id: Option<String>,
    pub payload: Value,
}

impl SignalInput {
    /// Build an input from the raw value the host supplied.
    #[must_use]
    pub fn from_value(payload: Value) -> Self {
        let org_id = payload
            .get("orgId")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { org_id, payload }
    }

    /// Input carrying only an org id.
    #[must_use]
    pub fn for_org(org_id: impl Into<String>) -> Self {
        let org_id = org_id.into();
        Self {
            payload: serde_json::json!({ "orgId": org_id }),
            org_id: Some(org_id),
        }
    }
}

impl From<Value> for SignalInput {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// A signal score: a boolean verdict or a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Boolean(bool),
    Number(f64),
}

impl Score {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Boolean(_) => None,
        }
    }
}

/// Result of a single signal invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalOutput {
    pub output_type: OutputType,
    pub score: Score,
}

impl SignalOutput {
    #[must_use]
    pub const fn boolean(score: bool) -> Self {
        Self {
            output_type: OutputType::BOOLEAN,
            score: Score::Boolean(score),
        }
    }

    #[must_use]
    pub const fn number(score: f64) -> Self {
        Self {
            output_type: OutputType::NUMBER,
            score: Score::Number(score),
        }
    }
}

/// Whether a signal is usable for an org, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledInfo {
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_message: Option<String>,
}

impl DisabledInfo {
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            disabled: false,
            disabled_message: None,
        }
    }

    #[must_use]
    pub fn disabled(message: impl Into<String>) -> Self {
        Self {
            disabled: true,
            disabled_message: Some(message.into()),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the plugin.
///
/// Signal logic itself never fails on bad config; errors come from the
/// credential accessor or from the surfaces that host the plugin.
#[derive(Debug, Error)]
pub enum CoopError {
    /// The credential accessor could not produce an org's config.
    #[error("Credentials unavailable for org {org_id}: {reason}")]
    CredentialUnavailable { org_id: String, reason: String },

    /// No signal is registered under the requested type id.
    #[error("Unknown signal type: {0}")]
    UnknownSignal(String),

    /// A caller supplied input that could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

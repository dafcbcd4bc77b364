//! # Integration Manifest
//!
//! Static metadata the host reads before any signal runs: identity, the
//! settings form rendered in Org settings, offered signal types, the model
//! card and logo assets.
//!
//! Built once per process on first access.

use crate::primitives::{
    DOCS_URL, INTEGRATION_ID, INTEGRATION_NAME, PLUGIN_VERSION, SIGNAL_TYPE_RANDOM_SCORE,
    SIGNAL_TYPE_RANDOM_SELECTION, TRUE_PERCENTAGE_KEY,
};
use crate::types::SignalTypeId;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// =============================================================================
// MANIFEST TYPES
// =============================================================================

/// Control the host renders for a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Password,
    Textarea,
}

/// One entry of the org settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationField {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCardField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCardSection {
    pub id: String,
    pub title: String,
    pub fields: Vec<ModelCardField>,
}

/// Model card shown on the integration's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCard {
    pub model_name: String,
    pub version: String,
    pub release_date: String,
    pub sections: Vec<ModelCardSection>,
}

impl ModelCard {
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&ModelCardSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Plugin identity and capabilities as registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub docs_url: String,
    pub requires_config: bool,
    pub configuration_fields: Vec<ConfigurationField>,
    pub signal_type_ids: Vec<SignalTypeId>,
    pub model_card: ModelCard,
    pub logo_path: String,
    pub logo_with_background_path: String,
}

impl IntegrationManifest {
    /// Look up a configuration field by key.
    #[must_use]
    pub fn config_field(&self, key: &str) -> Option<&ConfigurationField> {
        self.configuration_fields.iter().find(|f| f.key == key)
    }

    /// Whether this plugin offers `signal_type`.
    #[must_use]
    pub fn offers(&self, signal_type: &str) -> bool {
        self.signal_type_ids.iter().any(|id| id.as_str() == signal_type)
    }
}

// =============================================================================
// STATIC MANIFEST
// =============================================================================

static MANIFEST: LazyLock<IntegrationManifest> = LazyLock::new(build_manifest);

/// The plugin manifest.
pub fn manifest() -> &'static IntegrationManifest {
    &MANIFEST
}

fn field(label: &str, value: impl Into<String>) -> ModelCardField {
    ModelCardField {
        label: label.to_string(),
        value: value.into(),
    }
}

fn build_model_card() -> ModelCard {
    ModelCard {
        model_name: INTEGRATION_NAME.to_string(),
        version: PLUGIN_VERSION.to_string(),
        release_date: "2026".to_string(),
        sections: vec![
            ModelCardSection {
                id: "modelDetails".to_string(),
                title: "Model Details".to_string(),
                fields: vec![
                    field("Model Name", INTEGRATION_NAME),
                    field(
                        "Purpose",
                        "Example plugin with two signals: one uses org config (boolean), one \
                         returns a numeric score so you can set a threshold in the rule (over/under).",
                    ),
                    field(
                        "Signals",
                        format!(
                            "{SIGNAL_TYPE_RANDOM_SELECTION} (boolean, config-driven) and \
                             {SIGNAL_TYPE_RANDOM_SCORE} (number 0–1, threshold in rule)."
                        ),
                    ),
                ],
            },
            ModelCardSection {
                id: "technicalIntegration".to_string(),
                title: "Technical Integration".to_string(),
                fields: vec![
                    field(
                        "Signal types",
                        format!("{SIGNAL_TYPE_RANDOM_SELECTION}, {SIGNAL_TYPE_RANDOM_SCORE}"),
                    ),
                    field(
                        "Config",
                        "truePercentage (0–100) for Random Signal Selection only; Random Score \
                         needs no config.",
                    ),
                ],
            },
        ],
    }
}

fn build_manifest() -> IntegrationManifest {
    IntegrationManifest {
        id: INTEGRATION_ID.to_string(),
        name: INTEGRATION_NAME.to_string(),
        version: PLUGIN_VERSION.to_string(),
        description: "Example plugin with two signals: config-driven boolean and a numeric score \
                      you compare with a threshold in the rule."
            .to_string(),
        docs_url: DOCS_URL.to_string(),
        requires_config: true,
        configuration_fields: vec![ConfigurationField {
            key: TRUE_PERCENTAGE_KEY.to_string(),
            label: "True percentage (0–100)".to_string(),
            required: true,
            input_type: InputType::Text,
            placeholder: Some("50".to_string()),
            description: Some(
                "Used by Random Signal Selection only. Probability (0–100) that it returns true. \
                 Default 50 if not set."
                    .to_string(),
            ),
        }],
        signal_type_ids: vec![
            SignalTypeId::new(SIGNAL_TYPE_RANDOM_SELECTION),
            SignalTypeId::new(SIGNAL_TYPE_RANDOM_SCORE),
        ],
        model_card: build_model_card(),
        logo_path: "roost-example-logo.png".to_string(),
        logo_with_background_path: "roost-example-with-background.png".to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn manifest_identity() {
        let m = manifest();
        assert_eq!(m.id, "COOP_INTEGRATION_EXAMPLE");
        assert_eq!(m.name, "COOP Integration Example");
        assert_eq!(m.version, "1.0.0");
        assert!(m.requires_config);
    }

    #[test]
    fn manifest_is_built_once() {
        assert!(std::ptr::eq(manifest(), manifest()));
    }

    #[test]
    fn offers_both_signals_in_order() {
        let ids: Vec<&str> = manifest().signal_type_ids.iter().map(SignalTypeId::as_str).collect();
        assert_eq!(ids, vec!["RANDOM_SIGNAL_SELECTION", "RANDOM_SCORE"]);
        assert!(manifest().offers("RANDOM_SCORE"));
        assert!(!manifest().offers("SOMETHING_ELSE"));
    }

    #[test]
    fn true_percentage_field() {
        let field = manifest().config_field("truePercentage").unwrap();
        assert!(field.required);
        assert_eq!(field.input_type, InputType::Text);
        assert_eq!(field.placeholder.as_deref(), Some("50"));
        assert!(manifest().config_field("missing").is_none());
    }

    #[test]
    fn config_keys_unique() {
        let keys: BTreeSet<&str> = manifest()
            .configuration_fields
            .iter()
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(keys.len(), manifest().configuration_fields.len());
    }

    #[test]
    fn model_card_sections() {
        let card = &manifest().model_card;
        assert_eq!(card.release_date, "2026");
        let details = card.section("modelDetails").unwrap();
        assert_eq!(details.title, "Model Details");
        assert_eq!(details.fields.len(), 3);
        let technical = card.section("technicalIntegration").unwrap();
        assert_eq!(
            technical.fields[0].value,
            "RANDOM_SIGNAL_SELECTION, RANDOM_SCORE"
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(manifest()).unwrap();
        assert_eq!(json["logoWithBackgroundPath"], "roost-example-with-background.png");
        assert_eq!(json["configurationFields"][0]["inputType"], "text");
        assert_eq!(json["modelCard"]["modelName"], "COOP Integration Example");
        assert_eq!(json["signalTypeIds"][1], "RANDOM_SCORE");
    }
}

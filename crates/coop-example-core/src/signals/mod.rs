//! # Signals
//!
//! A signal pairs a static [`SignalDescriptor`] (what the host shows in the
//! rule editor) with two async operations:
//! - `run`: score one item
//! - `disabled_info`: tell the host whether an org may use the signal
//!
//! Both signals in this plugin are free, language-agnostic and accept every
//! input kind, so they share [`SignalDescriptor::free`] for the common fields.

mod random_score;
mod random_selection;

pub use random_score::RandomScore;
pub use random_selection::RandomSignalSelection;

use crate::primitives::DEFAULT_THRESHOLD;
use crate::types::{
    CoopError, DisabledInfo, EligibleInput, OutputType, PricingStructure, RecommendedThresholds,
    SignalId, SignalInput, SignalOutput, SupportedLanguages,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Static description of a signal, serialized for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalDescriptor {
    pub id: SignalId,
    pub display_name: String,
    pub description: String,
    pub docs_url: Option<String>,
    pub recommended_thresholds: RecommendedThresholds,
    pub supported_languages: SupportedLanguages,
    pub pricing_structure: PricingStructure,
    pub eligible_inputs: Vec<EligibleInput>,
    pub output_type: OutputType,
    pub needs_matching_values: bool,
    pub eligible_subcategories: Vec<String>,
    pub needs_action_penalties: bool,
    /// Id of the integration that owns the signal.
    pub integration: String,
    pub allowed_in_automated_rules: bool,
}

impl SignalDescriptor {
    /// Descriptor for a free signal usable on any input, in any language and
    /// in automated rules.
    pub fn free(
        signal_type: &str,
        display_name: &str,
        description: &str,
        output_type: OutputType,
        integration: &str,
    ) -> Self {
        Self {
            id: SignalId::new(signal_type),
            display_name: display_name.to_string(),
            description: description.to_string(),
            docs_url: None,
            recommended_thresholds: RecommendedThresholds {
                high_precision_threshold: DEFAULT_THRESHOLD,
                high_recall_threshold: DEFAULT_THRESHOLD,
            },
            supported_languages: SupportedLanguages::ALL,
            pricing_structure: PricingStructure::FREE,
            eligible_inputs: vec![
                EligibleInput::String,
                EligibleInput::Image,
                EligibleInput::FullItem,
            ],
            output_type,
            needs_matching_values: false,
            eligible_subcategories: Vec::new(),
            needs_action_penalties: false,
            integration: integration.to_string(),
            allowed_in_automated_rules: true,
        }
    }
}

// =============================================================================
// SIGNAL TRAIT
// =============================================================================

/// A signal the host can invoke.
#[async_trait]
pub trait PluginSignal: Send + Sync {
    fn descriptor(&self) -> &SignalDescriptor;

    /// Cost charged per invocation.
    fn cost(&self) -> u32 {
        0
    }

    /// Score one item.
    async fn run(&self, input: &SignalInput) -> Result<SignalOutput, CoopError>;

    /// Whether `org_id` may use this signal.
    async fn disabled_info(&self, org_id: &str) -> Result<DisabledInfo, CoopError>;
}

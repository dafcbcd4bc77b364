//! # coop-example-core
//!
//! Example integration plugin for the Coop signal host - THE PLUGIN.
//!
//! Registers two signals and the static metadata describing them:
//! - `RANDOM_SIGNAL_SELECTION`: a boolean drawn with the org's configured
//!   `truePercentage` (0–100, default 50)
//! - `RANDOM_SCORE`: a number in `[0, 100)` the host compares to a rule threshold
//!
//! ## Architectural Constraints
//!
//! - The host owns rule evaluation, thresholds and credential storage;
//!   org config is only read through [`CredentialAccessor`]
//! - Invalid config never errors; it falls back to the default probability
//! - Signals are stateless: concurrent invocations are independent

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod context;
pub mod manifest;
pub mod plugin;
pub mod primitives;
pub mod random;
pub mod signals;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{has_true_percentage_config, parse_true_percentage};
pub use context::{CredentialAccessor, InMemoryCredentials, PluginSignalContext};
pub use manifest::{
    ConfigurationField, InputType, IntegrationManifest, ModelCard, ModelCardField,
    ModelCardSection, manifest,
};
pub use plugin::{CoopIntegrationExample, IntegrationPlugin, RegisteredSignal, SignalRegistry};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use signals::{PluginSignal, RandomScore, RandomSignalSelection, SignalDescriptor};
pub use types::{
    CoopError, DisabledInfo, EligibleInput, OrgConfig, OutputType, PricingStructure,
    RecommendedThresholds, ScalarType, Score, SignalId, SignalInput, SignalOutput, SignalTypeId,
    SupportedLanguages,
};

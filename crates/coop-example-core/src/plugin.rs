//! # Plugin Entry Point
//!
//! The host loads a plugin, reads its manifest, then calls `create_signals`
//! once with a [`PluginSignalContext`] and keeps the returned signals.

use crate::context::PluginSignalContext;
use crate::manifest::{IntegrationManifest, manifest};
use crate::primitives::{SIGNAL_TYPE_RANDOM_SCORE, SIGNAL_TYPE_RANDOM_SELECTION};
use crate::signals::{PluginSignal, RandomScore, RandomSignalSelection};
use crate::types::{CoopError, SignalTypeId};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// PLUGIN TRAIT
// =============================================================================

/// A signal with the type id the host registers it under.
#[derive(Clone)]
pub struct RegisteredSignal {
    pub signal_type_id: SignalTypeId,
    pub signal: Arc<dyn PluginSignal>,
}

impl fmt::Debug for RegisteredSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredSignal")
            .field("signal_type_id", &self.signal_type_id)
            .field("descriptor", self.signal.descriptor())
            .finish()
    }
}

/// The contract every Coop integration plugin fulfils.
pub trait IntegrationPlugin: Send + Sync {
    fn manifest(&self) -> &IntegrationManifest;

    /// Create the plugin's signals, in manifest order.
    fn create_signals(&self, context: &PluginSignalContext) -> Vec<RegisteredSignal>;
}

/// The example integration: a config-driven coin flip and a random score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoopIntegrationExample;

impl IntegrationPlugin for CoopIntegrationExample {
    fn manifest(&self) -> &IntegrationManifest {
        manifest()
    }

    fn create_signals(&self, context: &PluginSignalContext) -> Vec<RegisteredSignal> {
        vec![
            RegisteredSignal {
                signal_type_id: SignalTypeId::new(SIGNAL_TYPE_RANDOM_SELECTION),
                signal: Arc::new(RandomSignalSelection::new(context)),
            },
            RegisteredSignal {
                signal_type_id: SignalTypeId::new(SIGNAL_TYPE_RANDOM_SCORE),
                signal: Arc::new(RandomScore::new(context)),
            },
        ]
    }
}

// =============================================================================
// SIGNAL REGISTRY
// =============================================================================

/// Signals created by a plugin, looked up by type id.
#[derive(Debug, Clone, Default)]
pub struct SignalRegistry {
    signals: Vec<RegisteredSignal>,
}

impl SignalRegistry {
    /// Create the plugin's signals and index them.
    pub fn from_plugin(plugin: &dyn IntegrationPlugin, context: &PluginSignalContext) -> Self {
        let signals = plugin.create_signals(context);
        tracing::info!(
            integration = %context.integration_id,
            signals = signals.len(),
            "signals registered"
        );
        Self { signals }
    }

    /// Look up a signal by type id.
    pub fn get(&self, signal_type: &str) -> Result<&Arc<dyn PluginSignal>, CoopError> {
        self.signals
            .iter()
            .find(|s| s.signal_type_id.as_str() == signal_type)
            .map(|s| &s.signal)
            .ok_or_else(|| CoopError::UnknownSignal(signal_type.to_string()))
    }

    /// Registered signals in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSignal> {
        self.signals.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::context::InMemoryCredentials;
    use crate::primitives::INTEGRATION_ID;

    fn context() -> PluginSignalContext {
        PluginSignalContext::new(INTEGRATION_ID, Arc::new(InMemoryCredentials::new()))
    }

    #[test]
    fn signals_follow_manifest_order() {
        let plugin = CoopIntegrationExample;
        let created: Vec<SignalTypeId> = plugin
            .create_signals(&context())
            .into_iter()
            .map(|s| s.signal_type_id)
            .collect();
        assert_eq!(created, plugin.manifest().signal_type_ids);
    }

    #[test]
    fn registered_id_matches_descriptor_id() {
        for registered in CoopIntegrationExample.create_signals(&context()) {
            assert_eq!(
                registered.signal_type_id,
                registered.signal.descriptor().id.signal_type
            );
        }
    }

    #[test]
    fn signals_report_context_integration() {
        let context = PluginSignalContext::new("OTHER_ID", Arc::new(InMemoryCredentials::new()));
        for registered in CoopIntegrationExample.create_signals(&context) {
            assert_eq!(registered.signal.descriptor().integration, "OTHER_ID");
        }
    }

    #[test]
    fn registry_lookup() {
        let registry = SignalRegistry::from_plugin(&CoopIntegrationExample, &context());
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("RANDOM_SCORE").unwrap().descriptor().display_name,
            "Random Score"
        );
        let err = registry.get("NOPE").err().unwrap();
        assert!(matches!(err, CoopError::UnknownSignal(ref t) if t == "NOPE"));
    }
}

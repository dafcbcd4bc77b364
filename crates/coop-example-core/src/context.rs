//! # Signal Context
//!
//! What the host hands the plugin when it creates signals: the integration
//! id, a credential accessor for per-org config, and a randomness source.

use crate::random::{RandomSource, ThreadRandom};
use crate::types::{CoopError, OrgConfig};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

// =============================================================================
// CREDENTIAL ACCESSOR
// =============================================================================

/// Fetches an org's integration config.
///
/// Implemented by the host. `Ok(None)` means the org has never saved config
/// for this integration.
#[async_trait]
pub trait CredentialAccessor: Send + Sync {
    async fn get_credential(&self, org_id: &str) -> Result<Option<OrgConfig>, CoopError>;
}

/// A credential accessor backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    orgs: RwLock<BTreeMap<String, OrgConfig>>,
}

impl InMemoryCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) an org's config.
    pub fn insert(&self, org_id: impl Into<String>, config: OrgConfig) {
        let mut orgs = self.orgs.write().unwrap_or_else(|e| e.into_inner());
        orgs.insert(org_id.into(), config);
    }

    /// Org ids with stored config, in sorted order.
    #[must_use]
    pub fn org_ids(&self) -> Vec<String> {
        let orgs = self.orgs.read().unwrap_or_else(|e| e.into_inner());
        orgs.keys().cloned().collect()
    }

    /// Synchronous lookup, for callers outside an async context.
    #[must_use]
    pub fn get(&self, org_id: &str) -> Option<OrgConfig> {
        let orgs = self.orgs.read().unwrap_or_else(|e| e.into_inner());
        orgs.get(org_id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orgs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, OrgConfig)> for InMemoryCredentials {
    fn from_iter<I: IntoIterator<Item = (String, OrgConfig)>>(iter: I) -> Self {
        Self {
            orgs: RwLock::new(iter.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CredentialAccessor for InMemoryCredentials {
    async fn get_credential(&self, org_id: &str) -> Result<Option<OrgConfig>, CoopError> {
        Ok(self.get(org_id))
    }
}

// =============================================================================
// PLUGIN SIGNAL CONTEXT
// =============================================================================

/// Everything a signal needs from its host.
#[derive(Clone)]
pub struct PluginSignalContext {
    /// Integration id the created signals report as their owner.
    pub integration_id: String,
    pub credentials: Arc<dyn CredentialAccessor>,
    pub random: Arc<dyn RandomSource>,
}

impl PluginSignalContext {
    /// Create a context drawing from the thread RNG.
    pub fn new(integration_id: impl Into<String>, credentials: Arc<dyn CredentialAccessor>) -> Self {
        Self {
            integration_id: integration_id.into(),
            credentials,
            random: Arc::new(ThreadRandom),
        }
    }

    /// Replace the randomness source.
    #[must_use]
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }
}

impl fmt::Debug for PluginSignalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSignalContext")
            .field("integration_id", &self.integration_id)
            .finish_non_exhaustive()
    }
}

//! `RANDOM_SIGNAL_SELECTION`: a coin flip weighted by the org's `truePercentage`.

use super::{PluginSignal, SignalDescriptor};
use crate::config::{has_true_percentage_config, parse_true_percentage};
use crate::context::{CredentialAccessor, PluginSignalContext};
use crate::primitives::{
    DEFAULT_TRUE_PERCENTAGE, MAX_TRUE_PERCENTAGE, NOT_CONFIGURED_MESSAGE,
    SIGNAL_TYPE_RANDOM_SELECTION,
};
use crate::random::RandomSource;
use crate::types::{CoopError, DisabledInfo, OutputType, SignalInput, SignalOutput};
use async_trait::async_trait;
use std::sync::Arc;

/// Boolean signal whose probability of `true` comes from org config.
///
/// Without an org id the draw uses the default 50% probability and no
/// config is fetched.
pub struct RandomSignalSelection {
    descriptor: SignalDescriptor,
    credentials: Arc<dyn CredentialAccessor>,
    random: Arc<dyn RandomSource>,
}

impl RandomSignalSelection {
    pub fn new(context: &PluginSignalContext) -> Self {
        Self {
            descriptor: SignalDescriptor::free(
                SIGNAL_TYPE_RANDOM_SELECTION,
                "Coin Flip Selection",
                "Returns true or false at random, with a configurable probability (true \
                 percentage 0–100) from the integration config.",
                OutputType::BOOLEAN,
                &context.integration_id,
            ),
            credentials: Arc::clone(&context.credentials),
            random: Arc::clone(&context.random),
        }
    }

    /// Draw `true` with probability `true_percentage / 100`.
    fn flip(&self, true_percentage: f64) -> bool {
        self.random.next_unit() * MAX_TRUE_PERCENTAGE < true_percentage
    }
}

#[async_trait]
impl PluginSignal for RandomSignalSelection {
    fn descriptor(&self) -> &SignalDescriptor {
        &self.descriptor
    }

    async fn run(&self, input: &SignalInput) -> Result<SignalOutput, CoopError> {
        let Some(org_id) = input.org_id.as_deref() else {
            return Ok(SignalOutput::boolean(self.flip(DEFAULT_TRUE_PERCENTAGE)));
        };

        let config = self
            .credentials
            .get_credential(org_id)
            .await?
            .unwrap_or_default();
        let true_percentage = parse_true_percentage(&config);
        let score = self.flip(true_percentage);

        tracing::debug!(
            signal_type = SIGNAL_TYPE_RANDOM_SELECTION,
            org_id,
            true_percentage,
            score,
            "coin flip"
        );

        // BOOLEAN output: the host uses the score as the condition result.
        Ok(SignalOutput::boolean(score))
    }

    async fn disabled_info(&self, org_id: &str) -> Result<DisabledInfo, CoopError> {
        let config = self.credentials.get_credential(org_id).await?;
        if has_true_percentage_config(config.as_ref()) {
            Ok(DisabledInfo::enabled())
        } else {
            tracing::debug!(org_id, "truePercentage not configured");
            Ok(DisabledInfo::disabled(NOT_CONFIGURED_MESSAGE))
        }
    }
}

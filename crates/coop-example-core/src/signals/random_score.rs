//! `RANDOM_SCORE`: a uniform number in `[0, 100)` for threshold rules.

use super::{PluginSignal, SignalDescriptor};
use crate::context::PluginSignalContext;
use crate::primitives::{SCORE_SCALE, SIGNAL_TYPE_RANDOM_SCORE};
use crate::random::RandomSource;
use crate::types::{CoopError, DisabledInfo, OutputType, SignalInput, SignalOutput};
use async_trait::async_trait;
use std::sync::Arc;

/// Numeric signal that ignores its input. Needs no config and is never
/// disabled.
///
/// The published description and model card speak of a number between 0
/// and 1; the score actually spans `[0, SCORE_SCALE)`.
pub struct RandomScore {
    descriptor: SignalDescriptor,
    random: Arc<dyn RandomSource>,
}

impl RandomScore {
    pub fn new(context: &PluginSignalContext) -> Self {
        Self {
            descriptor: SignalDescriptor::free(
                SIGNAL_TYPE_RANDOM_SCORE,
                "Random Score",
                "Returns a random number between 0 and 1. Set a threshold in the rule (e.g. 0.5) \
                 and choose \"above\" or \"below\" to test numeric conditions.",
                OutputType::NUMBER,
                &context.integration_id,
            ),
            random: Arc::clone(&context.random),
        }
    }
}

#[async_trait]
impl PluginSignal for RandomScore {
    fn descriptor(&self) -> &SignalDescriptor {
        &self.descriptor
    }

    async fn run(&self, _input: &SignalInput) -> Result<SignalOutput, CoopError> {
        // NUMBER output: the host compares the score against the rule's threshold.
        Ok(SignalOutput::number(self.random.next_unit() * SCORE_SCALE))
    }

    async fn disabled_info(&self, _org_id: &str) -> Result<DisabledInfo, CoopError> {
        Ok(DisabledInfo::enabled())
    }
}

//! # API Request/Response Types
//!
//! JSON structures for the HTTP bridge that are not already host contract
//! types. Manifests, descriptors, outputs and disabled info are served with
//! their core serde representation.

use coop_example_core::{RegisteredSignal, SignalDescriptor};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// SIGNAL LISTING
// =============================================================================

/// One registered signal as listed by `GET /signals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEntry {
    pub signal_type_id: String,
    pub signal: SignalDescriptor,
    pub cost: u32,
}

impl From<&RegisteredSignal> for SignalEntry {
    fn from(registered: &RegisteredSignal) -> Self {
        Self {
            signal_type_id: registered.signal_type_id.to_string(),
            signal: registered.signal.descriptor().clone(),
            cost: registered.signal.cost(),
        }
    }
}

// =============================================================================
// DISABLED QUERY
// =============================================================================

/// Query string of `GET /signals/{signal_type}/disabled`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledQuery {
    pub org_id: Option<String>,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every non-2xx response produced by a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

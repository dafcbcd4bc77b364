//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{DisabledQuery, ErrorResponse, HealthResponse, SignalEntry},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coop_example_core::{CoopError, SignalInput};
use serde_json::Value;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// A `CoopError` rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CoopError);

impl From<CoopError> for ApiError {
    fn from(e: CoopError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            CoopError::UnknownSignal(_) => StatusCode::NOT_FOUND,
            CoopError::InvalidInput(_) | CoopError::Serialization(_) => StatusCode::BAD_REQUEST,
            CoopError::CredentialUnavailable { .. } => StatusCode::BAD_GATEWAY,
            CoopError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// MANIFEST HANDLER
// =============================================================================

/// Serve the plugin manifest.
pub async fn manifest_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.plugin.manifest().clone())
}

// =============================================================================
// SIGNAL HANDLERS
// =============================================================================

/// List registered signals with their descriptors.
pub async fn signals_handler(State(state): State<AppState>) -> impl IntoResponse {
    let entries: Vec<SignalEntry> = state.registry.iter().map(SignalEntry::from).collect();
    Json(entries)
}

/// Run a signal on the request body.
///
/// An empty body runs the signal without input.
pub async fn run_handler(
    State(state): State<AppState>,
    Path(signal_type): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signal = state.registry.get(&signal_type)?;

    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&body)
            .map_err(|e| CoopError::InvalidInput(format!("Body is not JSON: {}", e)))?
    };
    let input = SignalInput::from_value(payload);

    let output = signal.run(&input).await?;
    tracing::debug!(
        signal_type = %signal_type,
        org_id = input.org_id.as_deref().unwrap_or("-"),
        "signal run"
    );
    Ok(Json(output))
}

/// Report whether an org may use a signal.
pub async fn disabled_handler(
    State(state): State<AppState>,
    Path(signal_type): Path<String>,
    Query(query): Query<DisabledQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let signal = state.registry.get(&signal_type)?;
    let org_id = query
        .org_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoopError::InvalidInput("Missing orgId query parameter".to_string()))?;

    let info = signal.disabled_info(&org_id).await?;
    Ok(Json(info))
}

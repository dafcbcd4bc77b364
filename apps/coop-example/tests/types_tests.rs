//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum::response::IntoResponse;
use coop_example::api::{ApiError, DisabledQuery, ErrorResponse, HealthResponse, SignalEntry};
use coop_example_core::{
    CoopError, CoopIntegrationExample, InMemoryCredentials, PluginSignalContext, SignalRegistry,
    primitives::INTEGRATION_ID,
};
use std::sync::Arc;

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.1.0".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.1.0\""));
}

// =============================================================================
// SIGNAL ENTRY TESTS
// =============================================================================

fn entries() -> Vec<SignalEntry> {
    let context =
        PluginSignalContext::new(INTEGRATION_ID, Arc::new(InMemoryCredentials::new()));
    let registry = SignalRegistry::from_plugin(&CoopIntegrationExample, &context);
    registry.iter().map(SignalEntry::from).collect()
}

#[test]
fn test_signal_entry_from_registered() {
    let entries = entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].signal_type_id, "RANDOM_SIGNAL_SELECTION");
    assert_eq!(entries[0].signal.display_name, "Coin Flip Selection");
    assert_eq!(entries[1].signal_type_id, "RANDOM_SCORE");
    assert_eq!(entries[1].signal.display_name, "Random Score");
}

#[test]
fn test_signal_entry_serialization() {
    let json = serde_json::to_value(&entries()[1]).unwrap();

    assert_eq!(json["signalTypeId"], "RANDOM_SCORE");
    assert_eq!(json["cost"], 0);
    assert_eq!(json["signal"]["id"]["type"], "RANDOM_SCORE");
    assert_eq!(json["signal"]["outputType"]["scalarType"], "NUMBER");
    assert_eq!(json["signal"]["supportedLanguages"], "ALL");
    assert_eq!(json["signal"]["pricingStructure"]["type"], "FREE");
}

// =============================================================================
// DISABLED QUERY TESTS
// =============================================================================

#[test]
fn test_disabled_query_deserialization() {
    let query: DisabledQuery = serde_json::from_str(r#"{"orgId":"acme"}"#).unwrap();
    assert_eq!(query.org_id.as_deref(), Some("acme"));

    let empty: DisabledQuery = serde_json::from_str("{}").unwrap();
    assert!(empty.org_id.is_none());
}

// =============================================================================
// ERROR RESPONSE TESTS
// =============================================================================

#[test]
fn test_error_response_serialization() {
    let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
    assert_eq!(json, r#"{"error":"boom"}"#);
}

#[test]
fn test_api_error_status_codes() {
    let cases = [
        (CoopError::UnknownSignal("X".into()), StatusCode::NOT_FOUND),
        (CoopError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
        (CoopError::Serialization("bad".into()), StatusCode::BAD_REQUEST),
        (
            CoopError::CredentialUnavailable {
                org_id: "acme".into(),
                reason: "down".into(),
            },
            StatusCode::BAD_GATEWAY,
        ),
        (CoopError::Io("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        let response = ApiError(error).into_response();
        assert_eq!(response.status(), expected);
    }
}

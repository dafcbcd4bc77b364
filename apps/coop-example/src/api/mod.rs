//! # HTTP Bridge
//!
//! Serves the plugin to a host over JSON using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /manifest` - Integration manifest
//! - `GET /signals` - Registered signals with descriptors and cost
//! - `POST /signals/{signal_type}/run` - Run a signal on the JSON body
//! - `GET /signals/{signal_type}/disabled?orgId=` - Disabled state for an org
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `COOP_EXAMPLE_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `COOP_EXAMPLE_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `COOP_EXAMPLE_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{API_KEY_ENV, get_api_key_from_env};
pub use handlers::ApiError;
pub use middleware::{RATE_LIMIT_ENV, create_rate_limiter, get_rate_limit_from_env};
pub use types::{DisabledQuery, ErrorResponse, HealthResponse, SignalEntry};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use coop_example_core::{
    CoopError, IntegrationPlugin, PluginSignalContext, SignalRegistry,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Environment variable holding allowed CORS origins.
pub const CORS_ORIGINS_ENV: &str = "COOP_EXAMPLE_CORS_ORIGINS";

/// Largest accepted request body (64 KiB).
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the plugin and the signals it created.
#[derive(Clone)]
pub struct AppState {
    pub plugin: Arc<dyn IntegrationPlugin>,
    pub registry: Arc<SignalRegistry>,
}

impl AppState {
    /// Create the plugin's signals against `context`.
    pub fn new(plugin: Arc<dyn IntegrationPlugin>, context: &PluginSignalContext) -> Self {
        let registry = SignalRegistry::from_plugin(plugin.as_ref(), context);
        Self {
            plugin,
            registry: Arc::new(registry),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins allowed when `COOP_EXAMPLE_CORS_ORIGINS` is unset.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Parse a comma-separated origin list, skipping blanks and invalid values.
fn parse_cors_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the CORS layer from `COOP_EXAMPLE_CORS_ORIGINS`.
///
/// `*` allows any origin. An unset variable, or one with no valid origin,
/// allows localhost only.
fn build_cors_layer() -> CorsLayer {
    let raw = match std::env::var(CORS_ORIGINS_ENV) {
        Ok(raw) => raw,
        Err(_) => return cors_for(parse_cors_origins(&LOCAL_ORIGINS.join(","))),
    };

    if raw.trim() == "*" {
        tracing::warn!(
            "CORS: Allowing ALL origins ({}=*). This is insecure for production!",
            CORS_ORIGINS_ENV
        );
        return CorsLayer::permissive();
    }

    let origins = parse_cors_origins(&raw);
    if origins.is_empty() {
        tracing::warn!(
            "CORS: No valid origins in {}, defaulting to localhost only",
            CORS_ORIGINS_ENV
        );
        return cors_for(parse_cors_origins(&LOCAL_ORIGINS.join(",")));
    }

    tracing::info!(count = origins.len(), "CORS: Allowing configured origins");
    cors_for(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set {} to enable authentication.",
            API_KEY_ENV
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/manifest", get(handlers::manifest_handler))
        .route("/signals", get(handlers::signals_handler))
        .route("/signals/{signal_type}/run", post(handlers::run_handler))
        .route(
            "/signals/{signal_type}/disabled",
            get(handlers::disabled_handler),
        );

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind `addr` and serve until ctrl-c.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), CoopError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CoopError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("coop-example HTTP bridge listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoopError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler, serve until the process is killed.
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_skipped() {
        let origins = parse_cors_origins(" https://a.example , ,https://b.example");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn invalid_origins_are_dropped() {
        assert!(parse_cors_origins("bad\norigin").is_empty());
    }

    #[test]
    fn local_origins_all_parse() {
        assert_eq!(
            parse_cors_origins(&LOCAL_ORIGINS.join(",")).len(),
            LOCAL_ORIGINS.len()
        );
    }
}

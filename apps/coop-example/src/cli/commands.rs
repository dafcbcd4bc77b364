//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use coop_example::api::{self, AppState, SignalEntry};
use coop_example::credentials::load_credentials;
use coop_example_core::{
    CoopError, CoopIntegrationExample, InMemoryCredentials, PluginSignalContext,
    Score, SeededRandom, SignalInput, SignalOutput, SignalRegistry, has_true_percentage_config,
    manifest, parse_true_percentage, primitives::INTEGRATION_ID,
};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// SHARED SETUP
// =============================================================================

/// Plugin, credentials and signal context shared by every command.
pub struct CommandEnv {
    pub plugin: Arc<CoopIntegrationExample>,
    pub credentials: Arc<InMemoryCredentials>,
    pub context: PluginSignalContext,
}

impl CommandEnv {
    /// Load credentials (if a file is given) and build the signal context.
    pub fn load(credentials_path: Option<&Path>, seed: Option<u64>) -> Result<Self, CoopError> {
        let credentials = match credentials_path {
            Some(path) => Arc::new(load_credentials(path)?),
            None => {
                tracing::debug!("No credentials file; every org is unconfigured");
                Arc::new(InMemoryCredentials::new())
            }
        };

        let mut context = PluginSignalContext::new(INTEGRATION_ID, credentials.clone());
        if let Some(seed) = seed {
            tracing::debug!(seed, "Using seeded random source");
            context = context.with_random(Arc::new(SeededRandom::new(seed)));
        }

        Ok(Self {
            plugin: Arc::new(CoopIntegrationExample),
            credentials,
            context,
        })
    }

    fn registry(&self) -> SignalRegistry {
        SignalRegistry::from_plugin(self.plugin.as_ref(), &self.context)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CoopError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| CoopError::Serialization(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn format_score(score: &Score) -> String {
    match score {
        Score::Boolean(b) => b.to_string(),
        Score::Number(n) => format!("{:.6}", n),
    }
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP bridge.
pub async fn cmd_serve(env: &CommandEnv, host: &str, port: u16) -> Result<(), CoopError> {
    let state = AppState::new(env.plugin.clone(), &env.context);

    println!("coop-example HTTP bridge starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Orgs:     {}", env.credentials.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health                           - Health check");
    println!("  GET  /manifest                         - Integration manifest");
    println!("  GET  /signals                          - Registered signals");
    println!("  POST /signals/{{signal_type}}/run        - Run a signal");
    println!("  GET  /signals/{{signal_type}}/disabled   - Disabled state (?orgId=)");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state).await
}

// =============================================================================
// MANIFEST COMMAND
// =============================================================================

/// Print the integration manifest.
pub fn cmd_manifest(json_mode: bool) -> Result<(), CoopError> {
    let m = manifest();

    if json_mode {
        return print_json(m);
    }

    println!("{} v{}", m.name, m.version);
    println!("{}", "=".repeat(m.name.len() + m.version.len() + 2));
    println!("Id:          {}", m.id);
    println!("Description: {}", m.description);
    println!("Docs:        {}", m.docs_url);
    println!();
    println!("Configuration:");
    for field in &m.configuration_fields {
        println!(
            "  {} ({}{})",
            field.key,
            field.label,
            if field.required { ", required" } else { "" }
        );
    }
    println!();
    println!("Signals:");
    for id in &m.signal_type_ids {
        println!("  {}", id);
    }

    Ok(())
}

// =============================================================================
// SIGNALS COMMAND
// =============================================================================

/// List registered signals.
pub fn cmd_signals(env: &CommandEnv, json_mode: bool) -> Result<(), CoopError> {
    let registry = env.registry();
    let entries: Vec<SignalEntry> = registry.iter().map(SignalEntry::from).collect();

    if json_mode {
        return print_json(&entries);
    }

    for entry in &entries {
        println!("{}", entry.signal_type_id);
        println!("  Name:   {}", entry.signal.display_name);
        println!("  Output: {:?}", entry.signal.output_type.scalar_type);
        println!("  Cost:   {}", entry.cost);
        println!("  {}", entry.signal.description);
    }

    Ok(())
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Build the signal input from `--input` JSON and `--org`.
///
/// `--org` overrides any `orgId` in the JSON input.
pub fn build_input(org: Option<String>, raw: Option<&str>) -> Result<SignalInput, CoopError> {
    let mut payload = match raw {
        Some(raw) => serde_json::from_str::<Value>(raw)
            .map_err(|e| CoopError::InvalidInput(format!("--input is not JSON: {}", e)))?,
        None => Value::Null,
    };

    if let Some(org) = org {
        if !payload.is_object() {
            payload = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut payload {
            map.insert("orgId".to_string(), Value::String(org));
        }
    }

    Ok(SignalInput::from_value(payload))
}

/// Invoke a signal `count` times.
pub async fn cmd_run(
    env: &CommandEnv,
    json_mode: bool,
    signal_type: &str,
    org: Option<String>,
    raw_input: Option<&str>,
    count: u32,
) -> Result<(), CoopError> {
    let registry = env.registry();
    let signal = registry.get(signal_type)?;
    let input = build_input(org, raw_input)?;

    let mut outputs: Vec<SignalOutput> = Vec::new();
    for _ in 0..count {
        outputs.push(signal.run(&input).await?);
    }

    if json_mode {
        return print_json(&outputs);
    }

    for (i, output) in outputs.iter().enumerate() {
        println!("{} #{}: {}", signal_type, i + 1, format_score(&output.score));
    }

    Ok(())
}

// =============================================================================
// DISABLED COMMAND
// =============================================================================

/// Show whether an org may use a signal.
pub async fn cmd_disabled(
    env: &CommandEnv,
    json_mode: bool,
    signal_type: &str,
    org_id: &str,
) -> Result<(), CoopError> {
    let registry = env.registry();
    let info = registry.get(signal_type)?.disabled_info(org_id).await?;

    if json_mode {
        return print_json(&info);
    }

    if info.disabled {
        println!("{} is DISABLED for org {}", signal_type, org_id);
        if let Some(message) = &info.disabled_message {
            println!("  {}", message);
        }
    } else {
        println!("{} is enabled for org {}", signal_type, org_id);
    }

    Ok(())
}

// =============================================================================
// ORGS COMMAND
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrgSummary {
    org_id: String,
    true_percentage: f64,
    configured: bool,
}

/// List orgs from the credentials file with their parsed truePercentage.
pub fn cmd_orgs(env: &CommandEnv, json_mode: bool) -> Result<(), CoopError> {
    let summaries: Vec<OrgSummary> = env
        .credentials
        .org_ids()
        .into_iter()
        .map(|org_id| {
            let config = env.credentials.get(&org_id).unwrap_or_default();
            OrgSummary {
                true_percentage: parse_true_percentage(&config),
                configured: has_true_percentage_config(Some(&config)),
                org_id,
            }
        })
        .collect();

    if json_mode {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        println!("No orgs loaded (pass --credentials <file.toml>)");
        return Ok(());
    }

    println!("{:<24} {:>8}  STATE", "ORG", "TRUE %");
    for s in &summaries {
        println!(
            "{:<24} {:>8.2}  {}",
            s.org_id,
            s.true_percentage,
            if s.configured { "enabled" } else { "disabled" }
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn org_flag_sets_org_id() {
        let input = build_input(Some("acme".to_string()), None).unwrap();
        assert_eq!(input.org_id.as_deref(), Some("acme"));
    }

    #[test]
    fn org_flag_overrides_input_org() {
        let input =
            build_input(Some("acme".to_string()), Some(r#"{"orgId":"globex","text":"hi"}"#))
                .unwrap();
        assert_eq!(input.org_id.as_deref(), Some("acme"));
        assert_eq!(input.payload["text"], "hi");
    }

    #[test]
    fn input_org_used_without_flag() {
        let input = build_input(None, Some(r#"{"orgId":"globex"}"#)).unwrap();
        assert_eq!(input.org_id.as_deref(), Some("globex"));
    }

    #[test]
    fn non_object_input_wrapped_when_org_given() {
        let input = build_input(Some("acme".to_string()), Some("\"just text\"")).unwrap();
        assert_eq!(input.org_id.as_deref(), Some("acme"));
    }

    #[test]
    fn invalid_json_rejected() {
        let err = build_input(None, Some("{not json")).err().unwrap();
        assert!(matches!(err, CoopError::InvalidInput(_)));
    }

    #[test]
    fn scores_format() {
        assert_eq!(format_score(&Score::Boolean(true)), "true");
        assert_eq!(format_score(&Score::Number(0.25)), "0.250000");
    }

    #[tokio::test]
    async fn run_unknown_signal_fails() {
        let env = CommandEnv::load(None, Some(1)).unwrap();
        let err = cmd_run(&env, true, "NOPE", None, None, 1).await.err().unwrap();
        assert!(matches!(err, CoopError::UnknownSignal(_)));
    }
}

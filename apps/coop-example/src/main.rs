//! # coop-example
//!
//! The main binary for the COOP integration example plugin.
//!
//! This application provides:
//! - HTTP bridge serving the manifest and signals to a host (axum-based)
//! - CLI interface for running signals locally
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 apps/coop-example (THE BINARY)              │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌────────────────┐  │
//! │  │    CLI      │    │ HTTP bridge │    │ credentials    │  │
//! │  │   (clap)    │    │   (axum)    │    │ file (toml)    │  │
//! │  └──────┬──────┘    └──────┬──────┘    └───────┬────────┘  │
//! │         │                  │                   │           │
//! │         └──────────────────┼───────────────────┘           │
//! │                            ▼                               │
//! │                 ┌────────────────────┐                     │
//! │                 │ coop-example-core  │                     │
//! │                 │   (THE PLUGIN)     │                     │
//! │                 └────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP bridge with org configs
//! coop-example --credentials orgs.toml serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! coop-example manifest --json-mode
//! coop-example --credentials orgs.toml run -s RANDOM_SIGNAL_SELECTION -o acme -n 10
//! coop-example --credentials orgs.toml disabled -s RANDOM_SIGNAL_SELECTION -o acme
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // COOP_EXAMPLE_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("COOP_EXAMPLE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coop_example=info,coop_example_core=info,tower_http=debug".into());

    // Logs go to stderr so --json-mode output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  COOP Integration Example v{}

  RANDOM_SIGNAL_SELECTION • RANDOM_SCORE
"#,
        env!("CARGO_PKG_VERSION")
    );
}

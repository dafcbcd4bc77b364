//! # coop-example CLI Module
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP bridge
//! - `manifest` - Print the integration manifest
//! - `signals` - List registered signals
//! - `run` - Invoke a signal
//! - `disabled` - Show whether an org may use a signal
//! - `orgs` - List orgs from the credentials file

mod commands;

use clap::{Parser, Subcommand};
use coop_example_core::CoopError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// coop-example - COOP integration example plugin
///
/// Serves and exercises the RANDOM_SIGNAL_SELECTION and RANDOM_SCORE signals.
#[derive(Parser, Debug)]
#[command(name = "coop-example")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// TOML file with per-org config ([orgs.<id>] tables)
    #[arg(short = 'C', long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Seed for reproducible signal draws
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP bridge
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Print the integration manifest
    Manifest,

    /// List registered signals
    Signals,

    /// Invoke a signal
    Run {
        /// Signal type id (RANDOM_SIGNAL_SELECTION, RANDOM_SCORE)
        #[arg(short, long)]
        signal: String,

        /// Org whose config drives the draw
        #[arg(short, long)]
        org: Option<String>,

        /// Raw JSON input; its orgId is used when --org is absent
        #[arg(short, long)]
        input: Option<String>,

        /// Number of invocations (1 to 10000)
        #[arg(
            short = 'n',
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..=10_000)
        )]
        count: u32,
    },

    /// Show whether an org may use a signal
    Disabled {
        /// Signal type id
        #[arg(short, long)]
        signal: String,

        /// Org id
        #[arg(short, long)]
        org: String,
    },

    /// List orgs from the credentials file with their parsed truePercentage
    Orgs,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CoopError> {
    let env = CommandEnv::load(cli.credentials.as_deref(), cli.seed)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(&env, &host, port).await,
        Some(Commands::Manifest) | None => cmd_manifest(json_mode),
        Some(Commands::Signals) => cmd_signals(&env, json_mode),
        Some(Commands::Run {
            signal,
            org,
            input,
            count,
        }) => cmd_run(&env, json_mode, &signal, org, input.as_deref(), count).await,
        Some(Commands::Disabled { signal, org }) => {
            cmd_disabled(&env, json_mode, &signal, &org).await
        }
        Some(Commands::Orgs) => cmd_orgs(&env, json_mode),
    }
}

// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pageforge - integrations layer for bulk page generation.
//!
//! This is the binary entry point for the Pageforge CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod doctor;
mod integrations;
mod status;

/// Pageforge - integrations layer for bulk page generation.
#[derive(Parser, Debug)]
#[command(name = "pageforge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show configuration and integration status.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Run diagnostic checks against the local environment.
    Doctor {
        /// Run additional intensive checks.
        #[arg(long)]
        deep: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Inspect the built-in integration catalog.
    Integrations {
        #[command(subcommand)]
        command: IntegrationsCommands,
    },
}

#[derive(Subcommand, Debug)]
enum IntegrationsCommands {
    /// List every known integration with its resolved status.
    List {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match pageforge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pageforge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.generation.log_level)
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        Some(Commands::Doctor { deep, plain }) => {
            match doctor::run_doctor(&config, deep, plain).await {
                Ok(true) => std::process::exit(1),
                Ok(false) => Ok(()),
                Err(e) => Err(e),
            }
        }
        Some(Commands::Integrations {
            command: IntegrationsCommands::List { plain },
        }) => integrations::run_list(&config, plain),
        None => {
            println!("pageforge: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("pageforge: {e}");
        std::process::exit(1);
    }
}

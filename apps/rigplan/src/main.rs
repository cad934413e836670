//! # rigplan - PC Build Planner
//!
//! The main binary for the rigplan deterministic build-planning engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for catalog and planning operations
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                apps/rigplan (THE BINARY)               │
//! │                                                        │
//! │  ┌───────────┐   ┌───────────┐   ┌─────────────────┐  │
//! │  │   CLI     │   │  HTTP API │   │    Narrator     │  │
//! │  │  (clap)   │   │  (axum)   │   │   (reqwest)     │  │
//! │  └─────┬─────┘   └─────┬─────┘   └────────┬────────┘  │
//! │        │               │                  │            │
//! │        └───────────────┼──────────────────┘            │
//! │                        ▼                               │
//! │                ┌──────────────┐                        │
//! │                │ rigplan-core │                        │
//! │                │ (THE LOGIC)  │                        │
//! │                └──────────────┘                        │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! rigplan --dataset parts.json server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! rigplan --dataset parts.json status
//! rigplan --dataset parts.json plan --budget 30000 --socket AM5
//! rigplan --dataset parts.json fit --gpu "MSI RTX 4070" --case "NR200P"
//! ```

use clap::Parser;
use rigplan::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — RIGPLAN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("RIGPLAN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rigplan=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the rigplan startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ██╗ ██████╗ ██████╗ ██╗      █████╗ ███╗   ██╗
  ██╔══██╗██║██╔════╝ ██╔══██╗██║     ██╔══██╗████╗  ██║
  ██████╔╝██║██║  ███╗██████╔╝██║     ███████║██╔██╗ ██║
  ██╔══██╗██║██║   ██║██╔═══╝ ██║     ██╔══██║██║╚██╗██║
  ██║  ██║██║╚██████╔╝██║     ███████╗██║  ██║██║ ╚████║
  ╚═╝  ╚═╝╚═╝ ╚═════╝ ╚═╝     ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝

  PC Build Planner v{}

  Deterministic • Compatible • Within Budget
"#,
        env!("CARGO_PKG_VERSION")
    );
}

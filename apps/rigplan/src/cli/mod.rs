//! # rigplan CLI Module
//!
//! This module implements the CLI interface for rigplan.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show catalog counts
//! - `plan` - Enumerate builds for a budget + platform
//! - `fit` - GPU-in-case fit check
//! - `psu` - PSU sufficiency check
//! - `mb` - Motherboard listing for a socket + memory standard

mod commands;

use clap::{Parser, Subcommand};
use rigplan_core::PlanError;
use rigplan_core::limits::{DEFAULT_LISTING_LIMIT, DEFAULT_MAX_RESULTS, DEFAULT_TOP_N};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// rigplan - PC Build Planner
///
/// A deterministic component-compatibility and build-planning engine.
/// All answers derive from the ingested catalog; nothing is guessed.
#[derive(Parser, Debug)]
#[command(name = "rigplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the component dataset (JSON)
    #[arg(short = 'd', long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Path to an optional TOML config file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show catalog status
    Status,

    /// Enumerate builds for a budget + platform
    Plan {
        /// Total budget, inclusive ceiling
        #[arg(short, long, default_value = "30000")]
        budget: i64,

        /// Platform socket, e.g. AM5 / LGA1700
        #[arg(short, long, default_value = "AM5")]
        socket: String,

        /// Memory standard, e.g. DDR5
        #[arg(short, long, default_value = "DDR5")]
        mem: String,

        /// Board/case form factor, e.g. Mini-ITX / ATX
        #[arg(short, long, default_value = "Mini-ITX")]
        form_factor: String,

        /// Include a discrete GPU
        #[arg(short = 'g', long)]
        include_gpu: bool,

        /// Per-category candidate window (1..=20)
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        topn: usize,

        /// Result cap (1..=50)
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },

    /// Check whether a GPU fits a case
    Fit {
        /// GPU model name
        #[arg(long)]
        gpu: String,

        /// Case model name
        #[arg(long)]
        case: String,
    },

    /// Check whether a PSU covers a GPU + CPU pairing
    Psu {
        /// GPU model name
        #[arg(long)]
        gpu: String,

        /// CPU model name
        #[arg(long)]
        cpu: String,

        /// PSU model name
        #[arg(long)]
        psu: String,
    },

    /// List motherboards for a socket + memory standard
    Mb {
        /// Platform socket, e.g. AM5
        #[arg(short, long)]
        socket: String,

        /// Memory standard, e.g. DDR5
        #[arg(short, long)]
        mem: String,

        /// Row cap (1..=200)
        #[arg(short, long, default_value_t = DEFAULT_LISTING_LIMIT)]
        limit: usize,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PlanError> {
    let dataset = cli.dataset.as_deref();
    let config = cli.config.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            cmd_server(dataset, config, &host, port).await
        }
        Some(Commands::Status) => cmd_status(dataset, json_mode),
        Some(Commands::Plan {
            budget,
            socket,
            mem,
            form_factor,
            include_gpu,
            topn,
            max_results,
        }) => cmd_plan(
            dataset,
            config,
            json_mode,
            budget,
            &socket,
            &mem,
            &form_factor,
            include_gpu,
            topn,
            max_results,
        ),
        Some(Commands::Fit { gpu, case }) => cmd_fit(dataset, config, json_mode, &gpu, &case),
        Some(Commands::Psu { gpu, cpu, psu }) => {
            cmd_psu(dataset, config, json_mode, &gpu, &cpu, &psu)
        }
        Some(Commands::Mb { socket, mem, limit }) => {
            cmd_mb(dataset, json_mode, &socket, &mem, limit)
        }
        None => {
            // No subcommand - show status by default
            cmd_status(dataset, json_mode)
        }
    }
}

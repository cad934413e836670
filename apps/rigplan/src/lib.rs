//! # rigplan - PC Build Planner
//!
//! Library surface of the rigplan binary. The modules here wrap the pure
//! engine in `rigplan-core` with the async/network edges:
//!
//! - `api` - axum HTTP REST API
//! - `cli` - clap command-line interface
//! - `config` - optional TOML configuration
//! - `narrator` - optional LLM annotation client (advisory only)
//!
//! Exposed as a library so the integration tests can drive the router
//! without a real listener.

pub mod api;
pub mod cli;
pub mod config;
pub mod narrator;

//! # API Request/Response Types
//!
//! This module defines the query-parameter and JSON structures for the
//! HTTP API. Parameter names and defaults mirror the CLI surface.

use rigplan_core::limits::{DEFAULT_LISTING_LIMIT, DEFAULT_MAX_RESULTS, DEFAULT_TOP_N};
use rigplan_core::{Build, FitReport, MotherboardRow, PlanRequest, PsuReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// QUERY PARAMETER DEFAULTS
// =============================================================================

fn default_budget() -> i64 {
    30_000
}

fn default_socket() -> String {
    "AM5".to_string()
}

fn default_mem() -> String {
    "DDR5".to_string()
}

fn default_form_factor() -> String {
    "Mini-ITX".to_string()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_listing_limit() -> usize {
    DEFAULT_LISTING_LIMIT
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Catalog status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub part_count: usize,
    pub price_record_count: usize,
    /// Parts per category, keyed by the dataset key.
    pub categories: BTreeMap<String, usize>,
}

// =============================================================================
// FIT CHECK
// =============================================================================

/// Query parameters for `GET /fit`.
#[derive(Debug, Clone, Deserialize)]
pub struct FitParams {
    /// GPU model name.
    pub gpu: String,
    /// Case model name.
    pub case: String,
    /// Ask the narrator for an annotation.
    #[serde(default)]
    pub explain: bool,
}

/// Response for `GET /fit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResponse {
    #[serde(flatten)]
    pub report: FitReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

// =============================================================================
// PSU CHECK
// =============================================================================

/// Query parameters for `GET /psu/check`.
#[derive(Debug, Clone, Deserialize)]
pub struct PsuParams {
    pub gpu: String,
    pub cpu: String,
    pub psu: String,
    #[serde(default)]
    pub explain: bool,
}

/// Response for `GET /psu/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsuResponse {
    #[serde(flatten)]
    pub report: PsuReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

// =============================================================================
// MOTHERBOARD LISTING
// =============================================================================

/// Query parameters for `GET /mb`.
#[derive(Debug, Clone, Deserialize)]
pub struct MbParams {
    /// Platform socket, e.g. "AM5".
    pub socket: String,
    /// Memory standard, e.g. "DDR5".
    pub mem: String,
    /// Row cap, 1..=200.
    #[serde(default = "default_listing_limit")]
    pub limit: usize,
}

/// Response for `GET /mb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MbResponse {
    pub count: usize,
    pub results: Vec<MotherboardRow>,
}

// =============================================================================
// BUILD PLAN
// =============================================================================

/// Query parameters for `GET /build/plan`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanParams {
    /// Budget ceiling, inclusive.
    #[serde(default = "default_budget")]
    pub budget: i64,
    #[serde(default = "default_socket")]
    pub socket: String,
    #[serde(default = "default_mem")]
    pub mem: String,
    #[serde(default = "default_form_factor")]
    pub form_factor: String,
    #[serde(default)]
    pub include_gpu: bool,
    /// Per-category candidate window, 1..=20.
    #[serde(default = "default_top_n")]
    pub topn: usize,
    /// Result cap, 1..=50.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub explain: bool,
}

/// Response for `GET /build/plan`.
///
/// Echoes the effective request back as `params` so a caller can see which
/// defaults were filled in. An empty `results` with a `message` is a valid
/// "no combinations found" outcome, distinct from a 404.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub count: usize,
    pub results: Vec<Build>,
    /// The request as the planner saw it, defaults applied.
    pub params: PlanRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error payload for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

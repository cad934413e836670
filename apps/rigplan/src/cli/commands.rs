//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::narrator::Narrator;
use rigplan_core::{
    Catalog, Category, DatasetLoader, FitPolicy, PlanError, PlanRequest,
    checks::{fit_check, motherboards_for, psu_check},
    limits::MAX_LISTING_LIMIT,
    plan_builds,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum dataset file size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_DATASET_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PlanError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PlanError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PlanError::Dataset(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a dataset path: resolve symlinks and "..", require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PlanError> {
    let canonical = path
        .canonicalize()
        .map_err(|e| PlanError::Io(format!("Invalid file path '{}': {}", path.display(), e)))?;

    if !canonical.is_file() {
        return Err(PlanError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load the catalog from a dataset path.
///
/// No path means an empty catalog; every query then returns empty or
/// NotFound results, which is useful for smoke-testing the server.
pub fn load_catalog(dataset: Option<&Path>) -> Result<Catalog, PlanError> {
    let Some(path) = dataset else {
        tracing::warn!("No --dataset given, starting with an empty catalog");
        return Ok(Catalog::new());
    };

    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_DATASET_FILE_SIZE)?;

    let catalog = DatasetLoader::load_file(&validated, rigplan_core::DEFAULT_SOURCE_TAG)?;
    tracing::info!(
        "Loaded {} parts, {} price records from {:?}",
        catalog.part_count(),
        catalog.price_record_count(),
        validated
    );
    Ok(catalog)
}

/// Load the fit policy from the optional config file.
fn load_policy(config: Option<&Path>) -> Result<FitPolicy, PlanError> {
    Ok(AppConfig::load(config)?.policy)
}

/// Print a value as pretty JSON.
fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    dataset: Option<&Path>,
    config: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<(), PlanError> {
    let app_config = AppConfig::load(config)?;
    let catalog = load_catalog(dataset)?;
    let narrator = Narrator::from_config(&app_config.narrator);

    println!("rigplan PC Build Planner Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Dataset:  {:?}", dataset);
    println!("  Parts:    {}", catalog.part_count());
    println!("  Narrator: {}", if narrator.is_some() { "on" } else { "off" });
    println!();
    println!("Endpoints:");
    println!("  GET /health     - Health check");
    println!("  GET /status     - Catalog counts");
    println!("  GET /fit        - GPU-in-case fit check");
    println!("  GET /psu/check  - PSU sufficiency check");
    println!("  GET /mb         - Motherboard listing");
    println!("  GET /build/plan - Build enumeration");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::new(catalog, app_config.policy, narrator);
    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, state).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show catalog status.
pub fn cmd_status(dataset: Option<&Path>, json_mode: bool) -> Result<(), PlanError> {
    let catalog = load_catalog(dataset)?;

    if json_mode {
        let categories: serde_json::Map<String, serde_json::Value> = Category::ALL
            .iter()
            .map(|c| {
                (
                    c.dataset_key().to_string(),
                    serde_json::Value::from(catalog.count_in(*c)),
                )
            })
            .collect();
        let output = serde_json::json!({
            "dataset": dataset.map(|p| p.to_string_lossy().into_owned()),
            "part_count": catalog.part_count(),
            "price_record_count": catalog.price_record_count(),
            "categories": categories,
        });
        print_json(&output);
        return Ok(());
    }

    println!("rigplan Catalog Status");
    println!("======================");
    println!("Dataset: {:?}", dataset);
    println!();
    println!("Parts:         {}", catalog.part_count());
    println!("Price records: {}", catalog.price_record_count());
    println!();
    for category in Category::ALL {
        println!("  {:<12} {}", category.dataset_key(), catalog.count_in(category));
    }

    Ok(())
}

// =============================================================================
// PLAN COMMAND
// =============================================================================

/// Enumerate builds for a budget + platform.
pub fn cmd_plan(
    dataset: Option<&Path>,
    config: Option<&Path>,
    json_mode: bool,
    budget: i64,
    socket: &str,
    mem: &str,
    form_factor: &str,
    include_gpu: bool,
    topn: usize,
    max_results: usize,
) -> Result<(), PlanError> {
    let catalog = load_catalog(dataset)?;
    let policy = load_policy(config)?;

    let request = PlanRequest {
        budget,
        socket: socket.to_string(),
        memory_standard: mem.to_string(),
        form_factor: form_factor.to_string(),
        include_gpu,
        top_n: topn,
        max_results,
    };

    let builds = plan_builds(&catalog, &request, &policy)?;

    if json_mode {
        let output = serde_json::json!({
            "count": builds.len(),
            "results": builds,
            "params": &request,
        });
        print_json(&output);
        return Ok(());
    }

    if builds.is_empty() {
        println!(
            "No combinations found for {} / {} / {} within budget {}",
            socket, mem, form_factor, budget
        );
        return Ok(());
    }

    println!("{} build(s) within budget {}:", builds.len(), budget);
    println!();
    for (i, build) in builds.iter().enumerate() {
        println!("Build {} — total {}", i + 1, build.total);
        println!("  CPU:         {} ({})", build.cpu.model, build.cpu.price);
        println!(
            "  Motherboard: {} ({})",
            build.motherboard.model, build.motherboard.price
        );
        println!("  Memory:      {} ({})", build.memory.model, build.memory.price);
        println!("  Case:        {} ({})", build.case.model, build.case.price);
        if let Some(ref gpu) = build.gpu {
            println!("  GPU:         {} ({})", gpu.model, gpu.price);
        }
        println!("  PSU:         {} ({})", build.psu.model, build.psu.price);
        println!("  Min PSU:     {}W", build.required_watt_min);
        println!();
    }

    Ok(())
}

// =============================================================================
// FIT COMMAND
// =============================================================================

/// GPU-in-case fit check.
pub fn cmd_fit(
    dataset: Option<&Path>,
    config: Option<&Path>,
    json_mode: bool,
    gpu: &str,
    case: &str,
) -> Result<(), PlanError> {
    let catalog = load_catalog(dataset)?;
    let policy = load_policy(config)?;

    let report = fit_check(&catalog, gpu, case, &policy)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("Fit check: {} in {}", report.gpu, report.case);
    println!(
        "  Length: {:?}mm vs case max {:?}mm -> {}",
        report.gpu_length_mm,
        report.case_max_length_mm,
        if report.fits_by_length { "ok" } else { "too long" }
    );
    println!(
        "  Width:  {:?} slots vs case max {:?} -> {}",
        report.gpu_slots,
        report.case_max_slots,
        if report.fits_by_width { "ok" } else { "too wide" }
    );
    println!("  Fits:   {}", if report.fits_all { "yes" } else { "no" });

    Ok(())
}

// =============================================================================
// PSU COMMAND
// =============================================================================

/// PSU sufficiency check.
pub fn cmd_psu(
    dataset: Option<&Path>,
    config: Option<&Path>,
    json_mode: bool,
    gpu: &str,
    cpu: &str,
    psu: &str,
) -> Result<(), PlanError> {
    let catalog = load_catalog(dataset)?;
    let policy = load_policy(config)?;

    let report = psu_check(&catalog, gpu, cpu, psu, &policy)?;

    if json_mode {
        print_json(&report);
        return Ok(());
    }

    println!("PSU check: {} for {} + {}", report.psu, gpu, cpu);
    println!("  PSU wattage:     {:?}W", report.psu_watt);
    println!("  Recommended min: {}W", report.recommended_min);
    println!("  Sufficient:      {}", if report.ok { "yes" } else { "no" });

    Ok(())
}

// =============================================================================
// MB COMMAND
// =============================================================================

/// List motherboards for a socket + memory standard.
pub fn cmd_mb(
    dataset: Option<&Path>,
    json_mode: bool,
    socket: &str,
    mem: &str,
    limit: usize,
) -> Result<(), PlanError> {
    if limit == 0 || limit > MAX_LISTING_LIMIT {
        return Err(PlanError::InvalidInput(format!(
            "limit {} outside 1..={MAX_LISTING_LIMIT}",
            limit
        )));
    }

    let catalog = load_catalog(dataset)?;
    let rows = motherboards_for(&catalog, socket, mem, limit);

    if json_mode {
        let output = serde_json::json!({
            "count": rows.len(),
            "results": rows,
        });
        print_json(&output);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No motherboards found for {} / {}", socket, mem);
        return Ok(());
    }

    println!("{} motherboard(s) for {} / {}:", rows.len(), socket, mem);
    for row in &rows {
        println!(
            "  {} (chipset: {}, form factor: {}, slots: {}, max {} GB)",
            row.model,
            row.chipset.as_deref().unwrap_or("-"),
            row.form_factor.as_deref().unwrap_or("-"),
            row.memory_slots.map_or("-".to_string(), |v| v.to_string()),
            row.memory_max_gb.map_or("-".to_string(), |v| v.to_string()),
        );
    }

    Ok(())
}

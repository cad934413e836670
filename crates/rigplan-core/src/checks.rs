//! # Single-Pair Compatibility Checks
//!
//! Thin wrappers over the predicates for exactly one GPU+Case pair or one
//! GPU+CPU+PSU triple, plus the motherboard listing query. Each check
//! fails with `NotFound` when a named part is missing; otherwise it
//! returns the verdict together with the raw comparison values so a caller
//! (or the narrator) can explain it.

use crate::catalog::Catalog;
use crate::compat::{FitPolicy, psu_sufficient, required_watts};
use crate::{Category, PlanError};
use serde::{Deserialize, Serialize};

// =============================================================================
// FIT CHECK (GPU vs Case)
// =============================================================================

/// Verdict of a GPU-in-case fit check, with the values it compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitReport {
    pub gpu: String,
    pub case: String,
    /// Wire key `gpu_length`; values are millimetres.
    #[serde(rename = "gpu_length")]
    pub gpu_length_mm: Option<i64>,
    #[serde(rename = "case_max_length")]
    pub case_max_length_mm: Option<i64>,
    pub gpu_slots: Option<i64>,
    pub case_max_slots: Option<i64>,
    pub fits_by_length: bool,
    pub fits_by_width: bool,
    pub fits_all: bool,
}

/// Check whether a named GPU fits a named case.
pub fn fit_check(
    catalog: &Catalog,
    gpu_model: &str,
    case_model: &str,
    policy: &FitPolicy,
) -> Result<FitReport, PlanError> {
    let gpu = catalog
        .get(Category::Gpu, gpu_model)
        .ok_or_else(|| PlanError::not_found(Category::Gpu, gpu_model))?;
    let case = catalog
        .get(Category::Case, case_model)
        .ok_or_else(|| PlanError::not_found(Category::Case, case_model))?;

    let length = gpu.length_mm.unwrap_or(policy.gpu_length_sentinel_mm);
    let width = gpu.width_slots.unwrap_or(0);
    let max_width = case
        .max_gpu_width_slots
        .unwrap_or(policy.case_gpu_width_default_slots);

    let fits_by_length = case.max_gpu_length_mm.is_some_and(|max| length <= max);
    let fits_by_width = width <= max_width;

    Ok(FitReport {
        gpu: gpu.model.clone(),
        case: case.model.clone(),
        gpu_length_mm: gpu.length_mm,
        case_max_length_mm: case.max_gpu_length_mm,
        gpu_slots: gpu.width_slots,
        case_max_slots: case.max_gpu_width_slots,
        fits_by_length,
        fits_by_width,
        fits_all: fits_by_length && fits_by_width,
    })
}

// =============================================================================
// PSU CHECK (GPU + CPU vs PSU)
// =============================================================================

/// Verdict of a PSU sufficiency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsuReport {
    pub psu: String,
    pub psu_watt: Option<i64>,
    pub recommended_min: i64,
    pub ok: bool,
}

/// Check whether a named PSU covers a named GPU + CPU pairing.
pub fn psu_check(
    catalog: &Catalog,
    gpu_model: &str,
    cpu_model: &str,
    psu_model: &str,
    policy: &FitPolicy,
) -> Result<PsuReport, PlanError> {
    let gpu = catalog
        .get(Category::Gpu, gpu_model)
        .ok_or_else(|| PlanError::not_found(Category::Gpu, gpu_model))?;
    let cpu = catalog
        .get(Category::Cpu, cpu_model)
        .ok_or_else(|| PlanError::not_found(Category::Cpu, cpu_model))?;
    let psu = catalog
        .get(Category::Psu, psu_model)
        .ok_or_else(|| PlanError::not_found(Category::Psu, psu_model))?;

    let recommended_min = required_watts(cpu, Some(gpu), policy);

    Ok(PsuReport {
        psu: psu.model.clone(),
        psu_watt: psu.wattage_w,
        recommended_min,
        ok: psu_sufficient(psu, recommended_min),
    })
}

// =============================================================================
// MOTHERBOARD LISTING
// =============================================================================

/// One row of the motherboard listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotherboardRow {
    pub model: String,
    pub chipset: Option<String>,
    pub form_factor: Option<String>,
    pub memory_slots: Option<i64>,
    #[serde(rename = "memory_max")]
    pub memory_max_gb: Option<i64>,
}

/// Motherboards supporting the socket and memory standard, in model-name
/// order, capped at `limit`.
#[must_use]
pub fn motherboards_for(
    catalog: &Catalog,
    socket: &str,
    memory_standard: &str,
    limit: usize,
) -> Vec<MotherboardRow> {
    catalog
        .motherboards_for(socket, memory_standard)
        .take(limit)
        .map(|mb| MotherboardRow {
            model: mb.model.clone(),
            chipset: mb.chipset.clone(),
            form_factor: mb.form_factor.clone(),
            memory_slots: mb.memory_slots,
            memory_max_gb: mb.memory_max_gb,
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

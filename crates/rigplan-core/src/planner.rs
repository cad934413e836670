//! # Build Enumerator
//!
//! The constraint solver: joins the per-category candidate windows into
//! complete builds satisfying every pairwise predicate and the budget
//! ceiling, ranked by ascending total price.
//!
//! The join prunes at each stage instead of materializing the full cross
//! product; the stage order follows the cheapest-predicate-first layout of
//! the original query and matters for performance only, since pruning
//! commutes:
//!
//! 1. CPU × Motherboard — socket + form-factor predicates
//! 2. × MemoryKit — memory-standard predicate
//! 3. × Case — pre-filtered to the target form factor by the selector
//! 4. × GPU — physical fit, and the wattage requirement is derived here
//! 5. × PSU — sufficiency against the derived requirement
//! 6. budget ceiling (inclusive), sort, cap at K
//!
//! Any empty candidate window empties the result set; that is a valid
//! outcome, not an error. The solver never sees more than the top-N window
//! per category, so it is complete over the window, not the catalog.

use crate::catalog::Catalog;
use crate::compat::{
    FitPolicy, form_factor_compatible, gpu_fits_case, memory_compatible, psu_sufficient,
    required_watts, socket_compatible,
};
use crate::limits::{
    DEFAULT_MAX_RESULTS, DEFAULT_TOP_N, MAX_RESULTS, MAX_TOP_N, MIN_BUDGET,
};
use crate::selector::{
    GpuSlot, case_candidates, cpu_candidates, gpu_candidates, memory_candidates,
    motherboard_candidates, psu_candidates,
};
use crate::{PlanError, Part};
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUEST
// =============================================================================

/// Parameters of one build-plan query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Hard price ceiling, inclusive.
    pub budget: i64,
    /// Platform socket, e.g. "AM5".
    pub socket: String,
    /// Memory standard, e.g. "DDR5".
    pub memory_standard: String,
    /// Target board/case form factor, e.g. "Mini-ITX".
    pub form_factor: String,
    /// Whether to include a discrete GPU.
    pub include_gpu: bool,
    /// Per-category candidate window (N).
    pub top_n: usize,
    /// Result cap (K).
    pub max_results: usize,
}

impl PlanRequest {
    /// A request with the default window and cap.
    #[must_use]
    pub fn new(
        budget: i64,
        socket: impl Into<String>,
        memory_standard: impl Into<String>,
        form_factor: impl Into<String>,
        include_gpu: bool,
    ) -> Self {
        Self {
            budget,
            socket: socket.into(),
            memory_standard: memory_standard.into(),
            form_factor: form_factor.into(),
            include_gpu,
            top_n: DEFAULT_TOP_N,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Reject out-of-range parameters before they reach the solver.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.budget < MIN_BUDGET {
            return Err(PlanError::InvalidInput(format!(
                "budget {} below minimum {MIN_BUDGET}",
                self.budget
            )));
        }
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(PlanError::InvalidInput(format!(
                "top_n {} outside 1..={MAX_TOP_N}",
                self.top_n
            )));
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS {
            return Err(PlanError::InvalidInput(format!(
                "max_results {} outside 1..={MAX_RESULTS}",
                self.max_results
            )));
        }
        if self.socket.is_empty()
            || self.memory_standard.is_empty()
            || self.form_factor.is_empty()
        {
            return Err(PlanError::InvalidInput(
                "socket, memory standard and form factor must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// One chosen component inside a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenPart {
    /// Model name of the chosen part.
    pub model: String,
    /// Resolved price used in the total.
    pub price: i64,
}

impl ChosenPart {
    fn of(part: &Part, price: i64) -> Self {
        Self {
            model: part.model.clone(),
            price,
        }
    }
}

/// A complete, compatible build within budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub cpu: ChosenPart,
    pub motherboard: ChosenPart,
    pub memory: ChosenPart,
    pub case: ChosenPart,
    /// `None` when the request excluded a discrete GPU.
    pub gpu: Option<ChosenPart>,
    pub psu: ChosenPart,
    /// Minimum PSU wattage derived for this CPU/GPU pairing.
    pub required_watt_min: i64,
    /// Sum of all resolved prices (the no-GPU slot contributes 0).
    pub total: i64,
}

// =============================================================================
// SOLVER
// =============================================================================

/// Enumerate compatible builds for the request.
///
/// Returns builds sorted by ascending total price, tie-broken by CPU then
/// motherboard model name, capped at `max_results`. An empty vector is a
/// valid "no combinations found" outcome.
pub fn plan_builds(
    catalog: &Catalog,
    req: &PlanRequest,
    policy: &FitPolicy,
) -> Result<Vec<Build>, PlanError> {
    req.validate()?;

    let n = req.top_n;
    let cpus = cpu_candidates(catalog, &req.socket, n);
    let boards = motherboard_candidates(catalog, &req.socket, &req.memory_standard, n);
    let rams = memory_candidates(catalog, &req.memory_standard, n);
    let cases = case_candidates(catalog, &req.form_factor, n);
    let gpus = gpu_candidates(catalog, req.include_gpu, n);
    let psus = psu_candidates(catalog, n);

    let mut builds = Vec::new();

    for cpu in &cpus {
        for board in &boards {
            if !socket_compatible(&cpu.part, &board.part) {
                continue;
            }
            // Form factor does not depend on the CPU, but filtering here
            // keeps the later stages small. The case side of the OR is
            // covered by the selector's pre-filter at stage 3.
            if !form_factor_compatible(&board.part, false, &req.form_factor) {
                continue;
            }
            for ram in &rams {
                if !memory_compatible(&ram.part, &req.memory_standard) {
                    continue;
                }
                for case in &cases {
                    for gpu in &gpus {
                        if !gpu_fits_case(gpu.part(), &case.part, policy) {
                            continue;
                        }
                        let req_watts = required_watts(&cpu.part, gpu.part(), policy);
                        for psu in &psus {
                            if !psu_sufficient(&psu.part, req_watts) {
                                continue;
                            }
                            let total = cpu
                                .price
                                .saturating_add(board.price)
                                .saturating_add(ram.price)
                                .saturating_add(case.price)
                                .saturating_add(gpu.price())
                                .saturating_add(psu.price);
                            if total > req.budget {
                                continue;
                            }
                            builds.push(Build {
                                cpu: ChosenPart::of(&cpu.part, cpu.price),
                                motherboard: ChosenPart::of(&board.part, board.price),
                                memory: ChosenPart::of(&ram.part, ram.price),
                                case: ChosenPart::of(&case.part, case.price),
                                gpu: match gpu {
                                    GpuSlot::None => None,
                                    GpuSlot::Card(c) => Some(ChosenPart::of(&c.part, c.price)),
                                },
                                psu: ChosenPart::of(&psu.part, psu.price),
                                required_watt_min: req_watts,
                                total,
                            });
                        }
                    }
                }
            }
        }
    }

    builds.sort_by(|a, b| {
        a.total
            .cmp(&b.total)
            .then_with(|| a.cpu.model.cmp(&b.cpu.model))
            .then_with(|| a.motherboard.model.cmp(&b.motherboard.model))
    });
    builds.truncate(req.max_results);
    Ok(builds)
}

// =============================================================================
// TESTS
// =============================================================================

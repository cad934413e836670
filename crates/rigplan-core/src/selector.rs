//! # Candidate Selector
//!
//! Per-category candidate windows for the build enumerator.
//!
//! Each category has its own hard filter: CPUs by socket, motherboards by
//! socket AND memory standard, memory kits by standard, cases by target
//! form factor; GPUs and PSUs are unfiltered. Candidates come back in
//! model-name order with their resolved latest price, capped at N.
//!
//! The GPU category has two mutually exclusive modes per request: either a
//! single synthetic "no GPU" candidate (price 0) or up to N real GPUs.

use crate::catalog::Catalog;
use crate::pricing::latest_price;
use crate::{Category, Part};

/// A selected part together with its resolved price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The catalog part.
    pub part: Part,
    /// Most recent price, 0 when the part has no price records.
    pub price: i64,
}

/// A GPU slot candidate: a real card or the "no GPU" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuSlot {
    /// No discrete GPU. Contributes price 0 and always fits any case.
    None,
    /// A real GPU candidate.
    Card(Candidate),
}

impl GpuSlot {
    /// The card's part, when one is selected.
    #[must_use]
    pub fn part(&self) -> Option<&Part> {
        match self {
            Self::None => None,
            Self::Card(c) => Some(&c.part),
        }
    }

    /// Price contribution of this slot.
    #[must_use]
    pub fn price(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Card(c) => c.price,
        }
    }
}

fn with_prices<'a>(
    catalog: &'a Catalog,
    parts: impl Iterator<Item = &'a Part>,
    limit: usize,
) -> Vec<Candidate> {
    parts
        .take(limit)
        .map(|part| Candidate {
            part: part.clone(),
            price: latest_price(catalog, part.category, &part.model),
        })
        .collect()
}

/// CPUs requiring the given socket, priced, capped at `limit`.
#[must_use]
pub fn cpu_candidates(catalog: &Catalog, socket: &str, limit: usize) -> Vec<Candidate> {
    with_prices(catalog, catalog.cpus_for_socket(socket), limit)
}

/// Motherboards supporting the socket and memory standard, priced.
#[must_use]
pub fn motherboard_candidates(
    catalog: &Catalog,
    socket: &str,
    memory_standard: &str,
    limit: usize,
) -> Vec<Candidate> {
    with_prices(
        catalog,
        catalog.motherboards_for(socket, memory_standard),
        limit,
    )
}

/// Memory kits of the given standard, priced.
#[must_use]
pub fn memory_candidates(
    catalog: &Catalog,
    memory_standard: &str,
    limit: usize,
) -> Vec<Candidate> {
    with_prices(catalog, catalog.memory_kits_for(memory_standard), limit)
}

/// Cases supporting the target form factor, priced.
#[must_use]
pub fn case_candidates(catalog: &Catalog, form_factor: &str, limit: usize) -> Vec<Candidate> {
    with_prices(catalog, catalog.cases_for_form_factor(form_factor), limit)
}

/// GPU slot candidates.
///
/// `include_gpu = false` yields exactly the sentinel; `true` yields up to
/// `limit` real cards (all GPUs in the catalog, unfiltered). The two modes
/// are never combined.
#[must_use]
pub fn gpu_candidates(catalog: &Catalog, include_gpu: bool, limit: usize) -> Vec<GpuSlot> {
    if include_gpu {
        with_prices(catalog, catalog.parts_in(Category::Gpu), limit)
            .into_iter()
            .map(GpuSlot::Card)
            .collect()
    } else {
        vec![GpuSlot::None]
    }
}

/// PSU candidates, unfiltered, priced.
#[must_use]
pub fn psu_candidates(catalog: &Catalog, limit: usize) -> Vec<Candidate> {
    with_prices(catalog, catalog.parts_in(Category::Psu), limit)
}

// =============================================================================
// TESTS
// =============================================================================

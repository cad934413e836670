//! # rigplan-core
//!
//! The deterministic build-planning engine for rigplan - THE LOGIC.
//!
//! This crate holds the in-memory component catalog, the pairwise
//! compatibility predicates, the price resolver and the budget-constrained
//! build enumerator. It answers three questions:
//!
//! - does this GPU fit this case?
//! - is this PSU sufficient for this CPU/GPU pairing?
//! - which complete builds satisfy a platform + budget request?
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Never mutates the catalog outside the ingest step; queries are pure
//! - Is deterministic: `BTreeMap` ordering, integer arithmetic, fixed
//!   tie-breaks
//! - Is bounded: every solver input is capped by the candidate window, so
//!   a request costs at most N^6 combination checks
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod checks;
pub mod compat;
pub mod ingest;
pub mod limits;
pub mod planner;
pub mod pricing;
pub mod selector;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Category, Part, PlanError, PriceRecord};

// =============================================================================
// RE-EXPORTS: Catalog & Ingest
// =============================================================================

pub use catalog::Catalog;
pub use ingest::{DEFAULT_SOURCE_TAG, DatasetLoader};

// =============================================================================
// RE-EXPORTS: Solver Surface
// =============================================================================

pub use checks::{FitReport, MotherboardRow, PsuReport, fit_check, motherboards_for, psu_check};
pub use compat::FitPolicy;
pub use planner::{Build, ChosenPart, PlanRequest, plan_builds};
pub use pricing::latest_price;
pub use selector::{Candidate, GpuSlot};

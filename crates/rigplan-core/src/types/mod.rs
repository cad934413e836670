//! # Core Type Definitions
//!
//! This module contains all core types for the rigplan catalog and solver:
//! - Component categories (`Category`)
//! - Catalog records (`Part`, `PriceRecord`)
//! - Error types (`PlanError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (prices and watts are `i64`, lengths are
//!   millimetres, widths are expansion slots)
//! - Implement `Ord` where they key `BTreeMap`/`BTreeSet` structures
//! - Carry optional attributes as `Option` instead of sentinel values;
//!   defaulting is the job of `FitPolicy`, not of the data model

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CATEGORY
// =============================================================================

/// The eight hardware categories a catalog part can belong to.
///
/// A part's model name is unique within its category, so `(Category, model)`
/// is the catalog-wide key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cpu,
    Motherboard,
    MemoryKit,
    Gpu,
    Storage,
    Psu,
    Case,
    Cooler,
}

impl Category {
    /// All categories in a fixed order, matching the dataset layout.
    pub const ALL: [Self; 8] = [
        Self::Cpu,
        Self::Motherboard,
        Self::MemoryKit,
        Self::Gpu,
        Self::Storage,
        Self::Psu,
        Self::Case,
        Self::Cooler,
    ];

    /// The key used for this category in the dataset JSON.
    #[must_use]
    pub const fn dataset_key(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Motherboard => "motherboard",
            Self::MemoryKit => "ram",
            Self::Gpu => "gpu",
            Self::Storage => "storage",
            Self::Psu => "psu",
            Self::Case => "case",
            Self::Cooler => "cooler",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Motherboard => "Motherboard",
            Self::MemoryKit => "MemoryKit",
            Self::Gpu => "GPU",
            Self::Storage => "Storage",
            Self::Psu => "PSU",
            Self::Case => "Case",
            Self::Cooler => "Cooler",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PART
// =============================================================================

/// One catalog record.
///
/// Attributes vary by category; everything beyond the model name is
/// optional. Missing attributes are resolved to policy defaults (or treated
/// as permissive) by the compatibility predicates, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Unique model name within the category. The catalog key.
    pub model: String,
    /// The hardware category of this part.
    pub category: Category,

    /// CPU/Motherboard: platform socket (vocabulary term, e.g. "AM5").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Motherboard: chipset vocabulary term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    /// Motherboard/MemoryKit: memory standard (e.g. "DDR5").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    /// Motherboard: board form factor (e.g. "ATX", "Mini-ITX").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    /// Motherboard: number of memory slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_slots: Option<i64>,
    /// Motherboard: maximum supported memory in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_max_gb: Option<i64>,

    /// GPU: card length in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<i64>,
    /// GPU: width in expansion slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_slots: Option<i64>,
    /// GPU: total graphics power in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tgp_w: Option<i64>,
    /// GPU: vendor-recommended PSU wattage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_psu_w: Option<i64>,

    /// CPU: thermal design power in watts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdp_w: Option<i64>,

    /// PSU: rated wattage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wattage_w: Option<i64>,

    /// Case: maximum GPU length in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gpu_length_mm: Option<i64>,
    /// Case: maximum GPU width in expansion slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gpu_width_slots: Option<i64>,
    /// Case: raw motherboard-support string, e.g. "ATX, Micro-ATX/Mini-ITX".
    /// The ingest step splits this into form-factor vocabulary edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor_support: Option<String>,

    /// Where this record came from (dataset tag).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
}

impl Part {
    /// Create a bare part with only the key fields set.
    #[must_use]
    pub fn new(category: Category, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            category,
            socket: None,
            chipset: None,
            memory_type: None,
            form_factor: None,
            memory_slots: None,
            memory_max_gb: None,
            length_mm: None,
            width_slots: None,
            tgp_w: None,
            recommended_psu_w: None,
            tdp_w: None,
            wattage_w: None,
            max_gpu_length_mm: None,
            max_gpu_width_slots: None,
            form_factor_support: None,
            source_tag: None,
        }
    }

    /// Brand vocabulary term: the first whitespace token of the model name.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.model.split_whitespace().next()
    }
}

// =============================================================================
// PRICE RECORD
// =============================================================================

/// A time-stamped price observation attached to one part.
///
/// Price records are append-only and never deduplicated: re-ingesting the
/// same price produces another record. The price resolver picks the most
/// recent one by `fetched_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Price in currency-agnostic integer units.
    pub price: i64,
    /// ISO-8601 fetch timestamp. Compared lexicographically; records
    /// without a timestamp sort after timestamped ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    /// Origin of the observation (scraper name, dataset tag, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PriceRecord {
    /// Create a record with just a price.
    #[must_use]
    pub fn new(price: i64) -> Self {
        Self {
            price,
            fetched_at: None,
            source: None,
        }
    }

    /// Create a fully-specified record.
    #[must_use]
    pub fn with_meta(
        price: i64,
        fetched_at: Option<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            price,
            fetched_at,
            source,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the rigplan core.
///
/// An empty build enumeration is NOT an error: it is a valid, reportable
/// outcome surfaced by the caller as "no combinations found". `NotFound` is
/// reserved for a named part missing from the catalog.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A named part does not exist in the requested category.
    #[error("{category} not found: {model}")]
    NotFound {
        /// The category that was searched.
        category: Category,
        /// The model name that was not found.
        model: String,
    },

    /// The request was rejected at the boundary before reaching the solver.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The dataset could not be parsed into a catalog.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// An I/O error occurred while reading a dataset or config file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl PlanError {
    /// Convenience constructor for `NotFound`.
    #[must_use]
    pub fn not_found(category: Category, model: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            model: model.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Dataset Ingest
//!
//! Loads a component dataset (JSON) into a [`Catalog`].
//!
//! - Part records are upserted with MERGE semantics (re-ingestion never
//!   duplicates a part or a vocabulary edge)
//! - Price records are APPENDED (re-ingestion of the same price produces a
//!   new time-stamped record; the price resolver picks the newest)
//! - Vocabulary terms are created on demand when first referenced
//! - Records without a model name are skipped, not rejected
//!
//! Dataset shape:
//!
//! ```json
//! {"components": {"cpu": [...], "motherboard": [...], "ram": [...],
//!  "gpu": [...], "storage": [...], "psu": [...], "case": [...],
//!  "cooler": [...]}}
//! ```

use crate::catalog::Catalog;
use crate::{Category, Part, PlanError, PriceRecord};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default source tag stamped on parts when the caller provides none.
pub const DEFAULT_SOURCE_TAG: &str = "dataset";

// =============================================================================
// RAW DATASET SHAPE
// =============================================================================

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    components: BTreeMap<String, Vec<RawComponent>>,
}

/// One raw component record as it appears in the dataset.
///
/// Numeric fields arrive as JSON numbers and may be fractional in scraped
/// data; they are rounded to integer units on load. The `*_num` variants
/// take precedence over their unsuffixed counterparts where both exist.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawComponent {
    #[serde(alias = "name")]
    model_name: Option<String>,
    socket: Option<String>,
    chipset: Option<String>,
    memory_type: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    form_factor: Option<String>,
    memory_slots: Option<serde_json::Number>,
    memory_max: Option<serde_json::Number>,
    length: Option<serde_json::Number>,
    length_num: Option<serde_json::Number>,
    width_slots: Option<serde_json::Number>,
    tgp: Option<serde_json::Number>,
    tgp_num: Option<serde_json::Number>,
    recommended_psu: Option<serde_json::Number>,
    tdp: Option<serde_json::Number>,
    tdp_num: Option<serde_json::Number>,
    wattage: Option<serde_json::Number>,
    max_gpu_length: Option<serde_json::Number>,
    max_gpu_width: Option<serde_json::Number>,
    motherboard_support: Option<String>,
    price: Option<serde_json::Number>,
    fetched_at: Option<String>,
    source: Option<String>,
    #[serde(alias = "price_records")]
    prices: Vec<RawPrice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPrice {
    price: Option<serde_json::Number>,
    fetched_at: Option<String>,
    source: Option<String>,
}

/// Round a JSON number to integer units.
fn as_i64(n: Option<&serde_json::Number>) -> Option<i64> {
    let n = n?;
    n.as_i64()
        .or_else(|| n.as_f64().map(|f| f.round() as i64))
}

/// Prefer the `*_num` variant over the raw field.
fn coalesce_num(
    num: Option<&serde_json::Number>,
    raw: Option<&serde_json::Number>,
) -> Option<i64> {
    as_i64(num).or_else(|| as_i64(raw))
}

// =============================================================================
// LOADER
// =============================================================================

/// The dataset loader. Validates records and populates a catalog.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse a dataset from a JSON string into a fresh catalog.
    pub fn load_str(json: &str, source_tag: &str) -> Result<Catalog, PlanError> {
        let mut catalog = Catalog::new();
        Self::merge_str(&mut catalog, json, source_tag)?;
        Ok(catalog)
    }

    /// Read and parse a dataset file into a fresh catalog.
    pub fn load_file(path: &Path, source_tag: &str) -> Result<Catalog, PlanError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PlanError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::load_str(&json, source_tag)
    }

    /// Merge a dataset into an existing catalog.
    ///
    /// Parts and edges are idempotent; price records accumulate.
    pub fn merge_str(
        catalog: &mut Catalog,
        json: &str,
        source_tag: &str,
    ) -> Result<(), PlanError> {
        let dataset: Dataset = serde_json::from_str(json)
            .map_err(|e| PlanError::Dataset(format!("invalid dataset JSON: {e}")))?;

        for category in Category::ALL {
            let Some(records) = dataset.components.get(category.dataset_key()) else {
                continue;
            };
            for raw in records {
                let Some(model) = raw.model_name.as_deref().filter(|m| !m.is_empty()) else {
                    continue;
                };
                let part = build_part(category, model, raw, source_tag);
                link_vocabulary(catalog, &part, raw);
                catalog.upsert_part(part);
                append_prices(catalog, category, model, raw, source_tag);
            }
        }
        Ok(())
    }
}

/// Translate a raw record into a typed part.
fn build_part(category: Category, model: &str, raw: &RawComponent, source_tag: &str) -> Part {
    let mut part = Part::new(category, model);
    part.socket = raw.socket.clone();
    part.chipset = raw.chipset.clone();
    // Memory kits say "type"; motherboards say "memory_type".
    part.memory_type = raw.kind.clone().or_else(|| raw.memory_type.clone());
    part.form_factor = raw.form_factor.clone();
    part.memory_slots = as_i64(raw.memory_slots.as_ref());
    part.memory_max_gb = as_i64(raw.memory_max.as_ref());
    part.length_mm = coalesce_num(raw.length_num.as_ref(), raw.length.as_ref());
    part.width_slots = as_i64(raw.width_slots.as_ref());
    part.tgp_w = coalesce_num(raw.tgp_num.as_ref(), raw.tgp.as_ref());
    part.recommended_psu_w = as_i64(raw.recommended_psu.as_ref());
    part.tdp_w = coalesce_num(raw.tdp_num.as_ref(), raw.tdp.as_ref());
    part.wattage_w = as_i64(raw.wattage.as_ref());
    part.max_gpu_length_mm = as_i64(raw.max_gpu_length.as_ref());
    part.max_gpu_width_slots = as_i64(raw.max_gpu_width.as_ref());
    part.form_factor_support = raw.motherboard_support.clone();
    part.source_tag = Some(source_tag.to_string());
    part
}

/// Create the vocabulary edges a record implies. All inserts are idempotent.
fn link_vocabulary(catalog: &mut Catalog, part: &Part, raw: &RawComponent) {
    match part.category {
        Category::Cpu => {
            if let Some(socket) = &part.socket {
                catalog.link_cpu_socket(&part.model, socket);
            }
        }
        Category::Motherboard => {
            if let Some(socket) = &part.socket {
                catalog.link_mb_socket(&part.model, socket);
            }
            if let Some(chipset) = &part.chipset {
                catalog.link_mb_chipset(&part.model, chipset);
            }
            if let Some(standard) = &part.memory_type {
                catalog.link_mb_memory(&part.model, standard);
            }
        }
        Category::MemoryKit => {
            if let Some(standard) = &part.memory_type {
                catalog.link_ram_memory(&part.model, standard);
            }
        }
        Category::Case => {
            if let Some(support) = &raw.motherboard_support {
                for token in split_form_factors(support) {
                    catalog.link_case_form_factor(&part.model, token);
                }
            }
        }
        Category::Gpu | Category::Storage | Category::Psu | Category::Cooler => {}
    }
}

/// Split a case support string like "ATX, Micro-ATX/Mini-ITX" into tokens.
fn split_form_factors(support: &str) -> impl Iterator<Item = &str> {
    support
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Append every price observation in the record. Never deduplicates.
fn append_prices(
    catalog: &mut Catalog,
    category: Category,
    model: &str,
    raw: &RawComponent,
    source_tag: &str,
) {
    let fallback_source = raw.source.clone().unwrap_or_else(|| source_tag.to_string());

    if let Some(price) = as_i64(raw.price.as_ref()) {
        catalog.append_price(
            category,
            model,
            PriceRecord::with_meta(price, raw.fetched_at.clone(), Some(fallback_source.clone())),
        );
    }

    for record in &raw.prices {
        let Some(price) = as_i64(record.price.as_ref()) else {
            continue;
        };
        let source = record.source.clone().unwrap_or_else(|| fallback_source.clone());
        catalog.append_price(
            category,
            model,
            PriceRecord::with_meta(price, record.fetched_at.clone(), Some(source)),
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_DATASET: &str = r#"{
        "components": {
            "cpu": [
                {"model_name": "AMD Ryzen 5 7600", "socket": "AM5", "tdp": 65, "price": 7000}
            ],
            "motherboard": [
                {"model_name": "ASRock B650M", "socket": "AM5", "chipset": "B650",
                 "memory_type": "DDR5", "form_factor": "Micro-ATX", "price": 4000}
            ],
            "ram": [
                {"model_name": "Kingston Fury 32GB", "type": "DDR5", "price": 2500}
            ],
            "case": [
                {"model_name": "Fractal Pop Mini", "motherboard_support": "Micro-ATX, Mini-ITX",
                 "max_gpu_length": 360, "max_gpu_width": 3, "price": 2200}
            ],
            "psu": [
                {"model_name": "Corsair CX650", "wattage": 650,
                 "prices": [{"price": 1800, "fetched_at": "2024-05-01"},
                            {"price": 1700, "fetched_at": "2024-06-01"}]}
            ]
        }
    }"#;

    #[test]
    fn load_small_dataset() {
        let catalog = DatasetLoader::load_str(SMALL_DATASET, "test").expect("load");

        assert_eq!(catalog.part_count(), 5);
        let cpu = catalog.get(Category::Cpu, "AMD Ryzen 5 7600").expect("cpu");
        assert_eq!(cpu.socket.as_deref(), Some("AM5"));
        assert_eq!(cpu.tdp_w, Some(65));
        assert_eq!(cpu.source_tag.as_deref(), Some("test"));
    }

    #[test]
    fn vocabulary_edges_created_on_demand() {
        let catalog = DatasetLoader::load_str(SMALL_DATASET, "test").expect("load");

        assert_eq!(catalog.cpus_for_socket("AM5").count(), 1);
        assert_eq!(catalog.motherboards_for("AM5", "DDR5").count(), 1);
        assert_eq!(catalog.memory_kits_for("DDR5").count(), 1);
        assert!(catalog.case_supports("Fractal Pop Mini", "Micro-ATX"));
        assert!(catalog.case_supports("Fractal Pop Mini", "Mini-ITX"));
        assert!(!catalog.case_supports("Fractal Pop Mini", "ATX"));
    }

    #[test]
    fn price_arrays_and_scalars_both_append() {
        let catalog = DatasetLoader::load_str(SMALL_DATASET, "test").expect("load");

        assert_eq!(catalog.price_history(Category::Psu, "Corsair CX650").len(), 2);
        assert_eq!(
            catalog
                .price_history(Category::Cpu, "AMD Ryzen 5 7600")
                .len(),
            1
        );
    }

    #[test]
    fn reingest_is_idempotent_for_parts_but_appends_prices() {
        let mut catalog = DatasetLoader::load_str(SMALL_DATASET, "test").expect("load");
        DatasetLoader::merge_str(&mut catalog, SMALL_DATASET, "test").expect("merge");

        assert_eq!(catalog.part_count(), 5);
        assert_eq!(catalog.cpus_for_socket("AM5").count(), 1);
        // Price series doubled: append-only by design.
        assert_eq!(catalog.price_history(Category::Psu, "Corsair CX650").len(), 4);
    }

    #[test]
    fn fractional_prices_round_to_integer_units() {
        let json = r#"{"components": {"gpu": [
            {"model_name": "RX 7600", "length": 240.4, "price": 8999.5}
        ]}}"#;
        let catalog = DatasetLoader::load_str(json, "test").expect("load");

        let gpu = catalog.get(Category::Gpu, "RX 7600").expect("gpu");
        assert_eq!(gpu.length_mm, Some(240));
        assert_eq!(
            catalog.price_history(Category::Gpu, "RX 7600")[0].price,
            9000
        );
    }

    #[test]
    fn records_without_model_name_are_skipped() {
        let json = r#"{"components": {"cpu": [{"socket": "AM5"}]}}"#;
        let catalog = DatasetLoader::load_str(json, "test").expect("load");
        assert_eq!(catalog.part_count(), 0);
    }

    #[test]
    fn num_suffix_fields_take_precedence() {
        let json = r#"{"components": {"gpu": [
            {"model_name": "RTX 4070", "length": 310, "length_num": 305,
             "tgp": 220, "tgp_num": 200}
        ]}}"#;
        let catalog = DatasetLoader::load_str(json, "test").expect("load");

        let gpu = catalog.get(Category::Gpu, "RTX 4070").expect("gpu");
        assert_eq!(gpu.length_mm, Some(305));
        assert_eq!(gpu.tgp_w, Some(200));
    }

    #[test]
    fn load_file_reads_dataset_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(SMALL_DATASET.as_bytes()).expect("write");

        let catalog = DatasetLoader::load_file(file.path(), "disk").expect("load");
        assert_eq!(catalog.part_count(), 5);

        let missing = Path::new("/nonexistent/dataset.json");
        let err = DatasetLoader::load_file(missing, "disk").expect_err("must fail");
        assert!(matches!(err, PlanError::Io(_)));
    }

    #[test]
    fn invalid_json_is_a_dataset_error() {
        let err = DatasetLoader::load_str("{not json", "test").expect_err("must fail");
        assert!(matches!(err, PlanError::Dataset(_)));
    }
}

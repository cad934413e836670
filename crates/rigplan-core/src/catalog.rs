//! # Catalog Store
//!
//! The in-memory component catalog for rigplan.
//!
//! This is the property-graph equivalent described by the data model:
//! typed part records keyed by `(Category, model)`, vocabulary adjacency
//! sets (socket, chipset, memory standard, form factor, brand) and
//! append-only price series per part.
//!
//! All containers are `BTreeMap`/`BTreeSet` for deterministic iteration;
//! every listing comes back in model-name order. Relationship inserts are
//! idempotent (MERGE semantics); price appends are not (by design).
//!
//! The solver only reads this structure. The only writer is the ingest
//! module, which runs before any query is served.

use crate::{Category, Part, PriceRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Adjacency set: vocabulary term name -> part model names.
type VocabIndex = BTreeMap<String, BTreeSet<String>>;

/// The in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Part storage: (category, model) -> Part.
    parts: BTreeMap<(Category, String), Part>,

    /// Socket -> CPU models that require it.
    cpu_by_socket: VocabIndex,
    /// Socket -> motherboard models that support it.
    mb_by_socket: VocabIndex,
    /// Chipset -> motherboard models.
    mb_by_chipset: VocabIndex,
    /// Memory standard -> motherboard models that support it.
    mb_by_memory: VocabIndex,
    /// Memory standard -> memory-kit models of that standard.
    ram_by_memory: VocabIndex,
    /// Form factor -> case models that support it (many-to-many).
    case_by_form_factor: VocabIndex,
    /// Brand -> models across all categories.
    models_by_brand: VocabIndex,

    /// Append-only price series: (category, model) -> records in
    /// insertion order.
    prices: BTreeMap<(Category, String), Vec<PriceRecord>>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // WRITE API (ingest only)
    // =========================================================================

    /// Insert or overlay a part record.
    ///
    /// MERGE semantics on the `(category, model)` key: a second upsert of the
    /// same key replaces attribute values instead of creating a duplicate.
    /// Also maintains the brand adjacency set.
    pub fn upsert_part(&mut self, part: Part) {
        if let Some(brand) = part.brand() {
            self.models_by_brand
                .entry(brand.to_string())
                .or_default()
                .insert(part.model.clone());
        }
        self.parts
            .insert((part.category, part.model.clone()), part);
    }

    /// Link a CPU to the socket it requires. Idempotent.
    pub fn link_cpu_socket(&mut self, model: &str, socket: &str) {
        insert_edge(&mut self.cpu_by_socket, socket, model);
    }

    /// Link a motherboard to a socket it supports. Idempotent.
    pub fn link_mb_socket(&mut self, model: &str, socket: &str) {
        insert_edge(&mut self.mb_by_socket, socket, model);
    }

    /// Link a motherboard to its chipset. Idempotent.
    pub fn link_mb_chipset(&mut self, model: &str, chipset: &str) {
        insert_edge(&mut self.mb_by_chipset, chipset, model);
    }

    /// Link a motherboard to a memory standard it supports. Idempotent.
    pub fn link_mb_memory(&mut self, model: &str, standard: &str) {
        insert_edge(&mut self.mb_by_memory, standard, model);
    }

    /// Link a memory kit to its standard. Idempotent.
    pub fn link_ram_memory(&mut self, model: &str, standard: &str) {
        insert_edge(&mut self.ram_by_memory, standard, model);
    }

    /// Link a case to a form factor it supports. Idempotent, many-to-many.
    pub fn link_case_form_factor(&mut self, model: &str, form_factor: &str) {
        insert_edge(&mut self.case_by_form_factor, form_factor, model);
    }

    /// Append a price record to a part's series. Never deduplicated.
    pub fn append_price(&mut self, category: Category, model: &str, record: PriceRecord) {
        self.prices
            .entry((category, model.to_string()))
            .or_default()
            .push(record);
    }

    // =========================================================================
    // READ API
    // =========================================================================

    /// Look up a single part by category and model name.
    #[must_use]
    pub fn get(&self, category: Category, model: &str) -> Option<&Part> {
        self.parts.get(&(category, model.to_string()))
    }

    /// All parts of a category, in model-name order.
    pub fn parts_in(&self, category: Category) -> impl Iterator<Item = &Part> {
        self.parts
            .range((category, String::new())..)
            .take_while(move |((c, _), _)| *c == category)
            .map(|(_, part)| part)
    }

    /// CPUs requiring the given socket, in model-name order.
    pub fn cpus_for_socket(&self, socket: &str) -> impl Iterator<Item = &Part> {
        self.edge_parts(&self.cpu_by_socket, socket, Category::Cpu)
    }

    /// Motherboards supporting both the socket and the memory standard,
    /// in model-name order.
    pub fn motherboards_for(
        &self,
        socket: &str,
        memory_standard: &str,
    ) -> impl Iterator<Item = &Part> {
        let by_socket = self.mb_by_socket.get(socket);
        let by_memory = self.mb_by_memory.get(memory_standard);
        by_socket
            .into_iter()
            .flat_map(BTreeSet::iter)
            .filter(move |m| by_memory.is_some_and(|set| set.contains(*m)))
            .filter_map(|m| self.get(Category::Motherboard, m))
    }

    /// Motherboards built on the given chipset, in model-name order.
    pub fn motherboards_for_chipset(&self, chipset: &str) -> impl Iterator<Item = &Part> {
        self.edge_parts(&self.mb_by_chipset, chipset, Category::Motherboard)
    }

    /// Memory kits of the given standard, in model-name order.
    pub fn memory_kits_for(&self, standard: &str) -> impl Iterator<Item = &Part> {
        self.edge_parts(&self.ram_by_memory, standard, Category::MemoryKit)
    }

    /// Cases supporting the given form factor, in model-name order.
    pub fn cases_for_form_factor(&self, form_factor: &str) -> impl Iterator<Item = &Part> {
        self.edge_parts(&self.case_by_form_factor, form_factor, Category::Case)
    }

    /// Whether the case identified by `model` supports `form_factor`.
    #[must_use]
    pub fn case_supports(&self, model: &str, form_factor: &str) -> bool {
        self.case_by_form_factor
            .get(form_factor)
            .is_some_and(|set| set.contains(model))
    }

    /// Model names of the given brand, across all categories, in name order.
    pub fn models_for_brand(&self, brand: &str) -> impl Iterator<Item = &str> {
        self.models_by_brand
            .get(brand)
            .into_iter()
            .flat_map(BTreeSet::iter)
            .map(String::as_str)
    }

    /// The full price series for a part, in insertion order.
    #[must_use]
    pub fn price_history(&self, category: Category, model: &str) -> &[PriceRecord] {
        self.prices
            .get(&(category, model.to_string()))
            .map_or(&[], Vec::as_slice)
    }

    /// Total number of parts across all categories.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Number of parts in one category.
    #[must_use]
    pub fn count_in(&self, category: Category) -> usize {
        self.parts_in(category).count()
    }

    /// Total number of price records.
    #[must_use]
    pub fn price_record_count(&self) -> usize {
        self.prices.values().map(Vec::len).sum()
    }

    /// Resolve an adjacency set into parts of the expected category.
    fn edge_parts<'a>(
        &'a self,
        index: &'a VocabIndex,
        term: &str,
        category: Category,
    ) -> impl Iterator<Item = &'a Part> {
        index
            .get(term)
            .into_iter()
            .flat_map(BTreeSet::iter)
            .filter_map(move |model| self.get(category, model))
    }
}

/// Idempotent edge insert shared by all vocabulary indexes.
fn insert_edge(index: &mut VocabIndex, term: &str, model: &str) {
    index
        .entry(term.to_string())
        .or_default()
        .insert(model.to_string());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(model: &str, socket: &str) -> Part {
        let mut part = Part::new(Category::Cpu, model);
        part.socket = Some(socket.to_string());
        part
    }

    #[test]
    fn upsert_same_key_overlays_instead_of_duplicating() {
        let mut catalog = Catalog::new();
        let mut first = cpu("AMD Ryzen 5 7600", "AM5");
        first.tdp_w = Some(65);
        catalog.upsert_part(first);

        let mut second = cpu("AMD Ryzen 5 7600", "AM5");
        second.tdp_w = Some(105);
        catalog.upsert_part(second);

        assert_eq!(catalog.part_count(), 1);
        let stored = catalog.get(Category::Cpu, "AMD Ryzen 5 7600").expect("part");
        assert_eq!(stored.tdp_w, Some(105));
    }

    #[test]
    fn same_model_in_two_categories_is_two_parts() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Cpu, "Phantom"));
        catalog.upsert_part(Part::new(Category::Case, "Phantom"));
        assert_eq!(catalog.part_count(), 2);
    }

    #[test]
    fn edge_insert_is_idempotent() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(cpu("AMD Ryzen 5 7600", "AM5"));
        catalog.link_cpu_socket("AMD Ryzen 5 7600", "AM5");
        catalog.link_cpu_socket("AMD Ryzen 5 7600", "AM5");

        let cpus: Vec<_> = catalog.cpus_for_socket("AM5").collect();
        assert_eq!(cpus.len(), 1);
    }

    #[test]
    fn price_append_is_not_deduplicated() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(cpu("AMD Ryzen 5 7600", "AM5"));
        catalog.append_price(Category::Cpu, "AMD Ryzen 5 7600", PriceRecord::new(7000));
        catalog.append_price(Category::Cpu, "AMD Ryzen 5 7600", PriceRecord::new(7000));

        assert_eq!(
            catalog.price_history(Category::Cpu, "AMD Ryzen 5 7600").len(),
            2
        );
    }

    #[test]
    fn parts_in_returns_model_name_order() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Psu, "Corsair RM750"));
        catalog.upsert_part(Part::new(Category::Psu, "Antec NeoEco 550"));
        catalog.upsert_part(Part::new(Category::Psu, "Seasonic Focus 650"));

        let models: Vec<_> = catalog.parts_in(Category::Psu).map(|p| &p.model).collect();
        assert_eq!(
            models,
            vec!["Antec NeoEco 550", "Corsair RM750", "Seasonic Focus 650"]
        );
    }

    #[test]
    fn motherboards_for_requires_both_edges() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Motherboard, "Board A"));
        catalog.upsert_part(Part::new(Category::Motherboard, "Board B"));
        catalog.link_mb_socket("Board A", "AM5");
        catalog.link_mb_memory("Board A", "DDR5");
        catalog.link_mb_socket("Board B", "AM5");
        // Board B has no DDR5 edge

        let boards: Vec<_> = catalog.motherboards_for("AM5", "DDR5").collect();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].model, "Board A");
    }

    #[test]
    fn case_supports_multiple_form_factors() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Case, "Mini Tower"));
        catalog.link_case_form_factor("Mini Tower", "ATX");
        catalog.link_case_form_factor("Mini Tower", "Micro-ATX");

        assert!(catalog.case_supports("Mini Tower", "ATX"));
        assert!(catalog.case_supports("Mini Tower", "Micro-ATX"));
        assert!(!catalog.case_supports("Mini Tower", "Mini-ITX"));
    }

    #[test]
    fn brand_index_tracks_first_model_token() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Psu, "Corsair RM750"));
        catalog.upsert_part(Part::new(Category::Case, "Corsair 4000D"));
        catalog.upsert_part(Part::new(Category::Psu, "Seasonic Focus 650"));

        let corsair: Vec<_> = catalog.models_for_brand("Corsair").collect();
        assert_eq!(corsair, vec!["Corsair 4000D", "Corsair RM750"]);
        assert!(catalog.models_for_brand("Noctua").next().is_none());
    }

    #[test]
    fn chipset_edge_lists_boards() {
        let mut catalog = Catalog::new();
        catalog.upsert_part(Part::new(Category::Motherboard, "ASRock B650M"));
        catalog.link_mb_chipset("ASRock B650M", "B650");

        let boards: Vec<_> = catalog.motherboards_for_chipset("B650").collect();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].model, "ASRock B650M");
    }

    #[test]
    fn unknown_part_has_empty_price_history() {
        let catalog = Catalog::new();
        assert!(catalog.price_history(Category::Gpu, "nope").is_empty());
    }
}

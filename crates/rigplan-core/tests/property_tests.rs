//! Property-based tests for the solver invariants.
//!
//! These check the ordering, budget and compatibility guarantees over
//! randomly generated catalogs.

#![allow(clippy::unwrap_used, clippy::panic)]

use proptest::collection::vec;
use proptest::prelude::*;
use rigplan_core::{
    Catalog, Category, FitPolicy, Part, PlanRequest, PriceRecord, plan_builds,
};
use rigplan_core::compat::required_watts;
use std::collections::BTreeSet;

/// Build a catalog from generated price/spec vectors. All parts are on the
/// AM5/DDR5/ATX platform so compatibility hinges on the numeric checks.
fn catalog_from(
    cpu_prices: &[i64],
    psu_specs: &[(i64, i64)], // (wattage, price)
    gpu_specs: &[(i64, i64, i64)], // (length, tgp, price)
) -> Catalog {
    let mut catalog = Catalog::new();

    for (i, price) in cpu_prices.iter().enumerate() {
        let model = format!("CPU {i:02}");
        let mut cpu = Part::new(Category::Cpu, &model);
        cpu.socket = Some("AM5".to_string());
        cpu.tdp_w = Some(65);
        catalog.upsert_part(cpu);
        catalog.link_cpu_socket(&model, "AM5");
        catalog.append_price(Category::Cpu, &model, PriceRecord::new(*price));
    }

    let mut mb = Part::new(Category::Motherboard, "Board");
    mb.socket = Some("AM5".to_string());
    mb.memory_type = Some("DDR5".to_string());
    mb.form_factor = Some("ATX".to_string());
    catalog.upsert_part(mb);
    catalog.link_mb_socket("Board", "AM5");
    catalog.link_mb_memory("Board", "DDR5");
    catalog.append_price(Category::Motherboard, "Board", PriceRecord::new(80));

    let mut ram = Part::new(Category::MemoryKit, "Kit");
    ram.memory_type = Some("DDR5".to_string());
    catalog.upsert_part(ram);
    catalog.link_ram_memory("Kit", "DDR5");
    catalog.append_price(Category::MemoryKit, "Kit", PriceRecord::new(50));

    let mut case = Part::new(Category::Case, "Case");
    case.max_gpu_length_mm = Some(330);
    case.max_gpu_width_slots = Some(4);
    catalog.upsert_part(case);
    catalog.link_case_form_factor("Case", "ATX");
    catalog.append_price(Category::Case, "Case", PriceRecord::new(80));

    for (i, (wattage, price)) in psu_specs.iter().enumerate() {
        let model = format!("PSU {i:02}");
        let mut psu = Part::new(Category::Psu, &model);
        psu.wattage_w = Some(*wattage);
        catalog.upsert_part(psu);
        catalog.append_price(Category::Psu, &model, PriceRecord::new(*price));
    }

    for (i, (length, tgp, price)) in gpu_specs.iter().enumerate() {
        let model = format!("GPU {i:02}");
        let mut gpu = Part::new(Category::Gpu, &model);
        gpu.length_mm = Some(*length);
        gpu.width_slots = Some(2);
        gpu.tgp_w = Some(*tgp);
        catalog.upsert_part(gpu);
        catalog.append_price(Category::Gpu, &model, PriceRecord::new(*price));
    }

    catalog
}

proptest! {
    /// Results are sorted non-decreasing by total and never exceed budget.
    #[test]
    fn totals_sorted_and_within_budget(
        cpu_prices in vec(0i64..5000, 1..6),
        psu_specs in vec((300i64..900, 0i64..2000), 1..6),
        budget in 1000i64..20_000,
    ) {
        let catalog = catalog_from(&cpu_prices, &psu_specs, &[]);
        let req = PlanRequest::new(budget, "AM5", "DDR5", "ATX", false);
        let builds = plan_builds(&catalog, &req, &FitPolicy::default()).unwrap();

        for pair in builds.windows(2) {
            prop_assert!(pair[0].total <= pair[1].total);
        }
        for build in &builds {
            prop_assert!(build.total <= budget);
        }
    }

    /// No duplicate component combination appears twice.
    #[test]
    fn no_duplicate_combinations(
        cpu_prices in vec(0i64..2000, 1..5),
        psu_specs in vec((300i64..900, 0i64..1000), 1..5),
    ) {
        let catalog = catalog_from(&cpu_prices, &psu_specs, &[]);
        let req = PlanRequest::new(20_000, "AM5", "DDR5", "ATX", false);
        let builds = plan_builds(&catalog, &req, &FitPolicy::default()).unwrap();

        let keys: BTreeSet<_> = builds
            .iter()
            .map(|b| {
                (
                    b.cpu.model.clone(),
                    b.motherboard.model.clone(),
                    b.memory.model.clone(),
                    b.case.model.clone(),
                    b.gpu.as_ref().map(|g| g.model.clone()),
                    b.psu.model.clone(),
                )
            })
            .collect();
        prop_assert_eq!(keys.len(), builds.len());
    }

    /// Every build honors the socket and the PSU requirement; GPU-less
    /// requests never carry a GPU.
    #[test]
    fn builds_satisfy_pairwise_predicates(
        cpu_prices in vec(0i64..2000, 1..5),
        psu_specs in vec((100i64..900, 0i64..1000), 1..6),
        gpu_specs in vec((200i64..400, 100i64..400, 0i64..5000), 0..4),
        include_gpu in any::<bool>(),
    ) {
        let catalog = catalog_from(&cpu_prices, &psu_specs, &gpu_specs);
        let req = PlanRequest::new(30_000, "AM5", "DDR5", "ATX", include_gpu);
        let builds = plan_builds(&catalog, &req, &FitPolicy::default()).unwrap();

        for build in &builds {
            let cpu = catalog.get(Category::Cpu, &build.cpu.model).unwrap();
            let mb = catalog.get(Category::Motherboard, &build.motherboard.model).unwrap();
            prop_assert_eq!(cpu.socket.as_deref(), mb.socket.as_deref());

            let psu = catalog.get(Category::Psu, &build.psu.model).unwrap();
            prop_assert!(psu.wattage_w.unwrap() >= build.required_watt_min);

            if include_gpu {
                let gpu_model = build.gpu.as_ref().map(|g| g.model.clone());
                prop_assert!(gpu_model.is_some());
                let gpu = catalog.get(Category::Gpu, &gpu_model.unwrap()).unwrap();
                // Generated cases cap length at 330.
                prop_assert!(gpu.length_mm.unwrap() <= 330);
            } else {
                prop_assert!(build.gpu.is_none());
            }
        }
    }

    /// Increasing a GPU's TGP (CPU held fixed) never decreases the derived
    /// PSU requirement.
    #[test]
    fn required_watts_monotone_in_tgp(
        tgp in 50i64..500,
        bump in 0i64..300,
        tdp in 35i64..170,
    ) {
        let policy = FitPolicy::default();
        let mut cpu = Part::new(Category::Cpu, "cpu");
        cpu.tdp_w = Some(tdp);

        let mut low = Part::new(Category::Gpu, "gpu");
        low.tgp_w = Some(tgp);
        let mut high = low.clone();
        high.tgp_w = Some(tgp + bump);

        prop_assert!(
            required_watts(&cpu, Some(&high), &policy)
                >= required_watts(&cpu, Some(&low), &policy)
        );
    }

    /// Planning is deterministic: the same catalog and request always
    /// produce the same result list.
    #[test]
    fn planning_is_deterministic(
        cpu_prices in vec(0i64..2000, 1..5),
        psu_specs in vec((300i64..900, 0i64..1000), 1..5),
    ) {
        let catalog = catalog_from(&cpu_prices, &psu_specs, &[]);
        let req = PlanRequest::new(15_000, "AM5", "DDR5", "ATX", false);

        let first = plan_builds(&catalog, &req, &FitPolicy::default()).unwrap();
        let second = plan_builds(&catalog, &req, &FitPolicy::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}

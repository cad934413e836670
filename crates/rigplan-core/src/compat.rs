//! # Compatibility Predicates
//!
//! Pure pairwise fit checks between catalog parts, plus the policy values
//! that fill in for missing attributes.
//!
//! Two documented leniencies are preserved on purpose (flagged for product
//! review, do not silently tighten):
//!
//! - a part with no `memory_type` counts as compatible with any standard
//! - a motherboard-level form-factor match (or a missing board form factor)
//!   passes without consulting the case's form-factor edge

use crate::Part;
use serde::Deserialize;

// =============================================================================
// FIT POLICY
// =============================================================================

/// Policy values for the numeric fit checks.
///
/// The defaults reproduce the established behavior; deployments can
/// override individual fields via the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FitPolicy {
    /// Assumed CPU TDP when the part has none recorded.
    pub cpu_tdp_default_w: i64,
    /// Assumed GPU TGP when the part has none recorded.
    pub gpu_tgp_default_w: i64,
    /// Headroom added on top of TGP + TDP when a discrete GPU is selected.
    pub gpu_headroom_w: i64,
    /// Headroom added on top of TDP when no discrete GPU is selected.
    pub no_gpu_headroom_w: i64,
    /// Assumed case GPU-width limit (slots) when the case has none recorded.
    pub case_gpu_width_default_slots: i64,
    /// Stand-in GPU length when the card has none recorded. Large on
    /// purpose: an unknown length only fits an effectively unlimited case.
    pub gpu_length_sentinel_mm: i64,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            cpu_tdp_default_w: 65,
            gpu_tgp_default_w: 150,
            gpu_headroom_w: 200,
            no_gpu_headroom_w: 150,
            case_gpu_width_default_slots: 10,
            gpu_length_sentinel_mm: 999_999,
        }
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// CPU and motherboard agree on the platform socket.
///
/// Both parts must carry a socket and the two must name the same
/// vocabulary term; a missing socket on either side is incompatible.
#[must_use]
pub fn socket_compatible(cpu: &Part, motherboard: &Part) -> bool {
    match (&cpu.socket, &motherboard.socket) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// The part's memory standard matches the target.
///
/// A part with no recorded `memory_type` is treated as compatible. This is
/// a known leniency, kept for behavioral compatibility.
#[must_use]
pub fn memory_compatible(part: &Part, standard: &str) -> bool {
    part.memory_type.as_deref().is_none_or(|t| t == standard)
}

/// The motherboard fits the target form factor.
///
/// Passes when the board's own form factor equals the target (or is
/// unrecorded), OR when the case is known to support the target. The
/// board-level match deliberately suffices on its own.
#[must_use]
pub fn form_factor_compatible(
    motherboard: &Part,
    case_supports_target: bool,
    target: &str,
) -> bool {
    motherboard
        .form_factor
        .as_deref()
        .is_none_or(|f| f == target)
        || case_supports_target
}

/// The GPU physically fits the case.
///
/// `gpu = None` is the "no discrete GPU" sentinel and always fits.
/// A GPU with no recorded length is assumed to be the sentinel length, so
/// it only fits a case with an equally extreme limit; a case with no
/// recorded length limit rejects every real GPU. The case width limit
/// defaults to `case_gpu_width_default_slots`.
#[must_use]
pub fn gpu_fits_case(gpu: Option<&Part>, case: &Part, policy: &FitPolicy) -> bool {
    let Some(gpu) = gpu else {
        return true;
    };
    let length = gpu.length_mm.unwrap_or(policy.gpu_length_sentinel_mm);
    let width = gpu.width_slots.unwrap_or(0);
    let max_width = case
        .max_gpu_width_slots
        .unwrap_or(policy.case_gpu_width_default_slots);

    case.max_gpu_length_mm
        .is_some_and(|max_length| length <= max_length)
        && width <= max_width
}

/// Minimum PSU wattage required by a CPU/GPU pairing.
///
/// With a GPU: the card's explicit recommended-PSU figure if present,
/// otherwise TGP + TDP + headroom. Without a GPU: TDP + a smaller headroom.
#[must_use]
pub fn required_watts(cpu: &Part, gpu: Option<&Part>, policy: &FitPolicy) -> i64 {
    let tdp = cpu.tdp_w.unwrap_or(policy.cpu_tdp_default_w);
    match gpu {
        Some(gpu) => gpu.recommended_psu_w.unwrap_or_else(|| {
            let tgp = gpu.tgp_w.unwrap_or(policy.gpu_tgp_default_w);
            tgp.saturating_add(tdp).saturating_add(policy.gpu_headroom_w)
        }),
        None => tdp.saturating_add(policy.no_gpu_headroom_w),
    }
}

/// The PSU meets the derived wattage requirement.
///
/// A PSU without a recorded wattage never qualifies.
#[must_use]
pub fn psu_sufficient(psu: &Part, required: i64) -> bool {
    psu.wattage_w.is_some_and(|w| w >= required)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn cpu(socket: Option<&str>, tdp: Option<i64>) -> Part {
        let mut p = Part::new(Category::Cpu, "cpu");
        p.socket = socket.map(String::from);
        p.tdp_w = tdp;
        p
    }

    fn motherboard(socket: Option<&str>, form_factor: Option<&str>) -> Part {
        let mut p = Part::new(Category::Motherboard, "mb");
        p.socket = socket.map(String::from);
        p.form_factor = form_factor.map(String::from);
        p
    }

    fn gpu(length: Option<i64>, width: Option<i64>) -> Part {
        let mut p = Part::new(Category::Gpu, "gpu");
        p.length_mm = length;
        p.width_slots = width;
        p
    }

    fn case_part(max_length: Option<i64>, max_width: Option<i64>) -> Part {
        let mut p = Part::new(Category::Case, "case");
        p.max_gpu_length_mm = max_length;
        p.max_gpu_width_slots = max_width;
        p
    }

    #[test]
    fn socket_match_requires_both_sides() {
        assert!(socket_compatible(
            &cpu(Some("AM5"), None),
            &motherboard(Some("AM5"), None)
        ));
        assert!(!socket_compatible(
            &cpu(Some("AM5"), None),
            &motherboard(Some("LGA1700"), None)
        ));
        assert!(!socket_compatible(
            &cpu(None, None),
            &motherboard(Some("AM5"), None)
        ));
        assert!(!socket_compatible(&cpu(Some("AM5"), None), &motherboard(None, None)));
    }

    #[test]
    fn memory_null_is_compatible() {
        let mut ram = Part::new(Category::MemoryKit, "ram");
        assert!(memory_compatible(&ram, "DDR5"));
        ram.memory_type = Some("DDR5".to_string());
        assert!(memory_compatible(&ram, "DDR5"));
        ram.memory_type = Some("DDR4".to_string());
        assert!(!memory_compatible(&ram, "DDR5"));
    }

    #[test]
    fn board_level_form_factor_match_suffices() {
        // Board matches target: passes even when the case edge says no.
        assert!(form_factor_compatible(
            &motherboard(None, Some("ATX")),
            false,
            "ATX"
        ));
        // Unrecorded board form factor: lenient pass.
        assert!(form_factor_compatible(&motherboard(None, None), false, "ATX"));
        // Mismatched board, case supports the target: passes via the case.
        assert!(form_factor_compatible(
            &motherboard(None, Some("Micro-ATX")),
            true,
            "ATX"
        ));
        // Mismatched board, no case support: fails.
        assert!(!form_factor_compatible(
            &motherboard(None, Some("Micro-ATX")),
            false,
            "ATX"
        ));
    }

    #[test]
    fn no_gpu_sentinel_always_fits() {
        let policy = FitPolicy::default();
        assert!(gpu_fits_case(None, &case_part(None, None), &policy));
    }

    #[test]
    fn gpu_length_and_width_both_checked() {
        let policy = FitPolicy::default();
        let case = case_part(Some(280), Some(3));

        assert!(gpu_fits_case(Some(&gpu(Some(280), Some(3))), &case, &policy));
        assert!(!gpu_fits_case(Some(&gpu(Some(300), Some(3))), &case, &policy));
        assert!(!gpu_fits_case(Some(&gpu(Some(250), Some(4))), &case, &policy));
    }

    #[test]
    fn unknown_gpu_length_only_fits_unlimited_case() {
        let policy = FitPolicy::default();
        assert!(!gpu_fits_case(
            Some(&gpu(None, Some(2))),
            &case_part(Some(400), None),
            &policy
        ));
        assert!(gpu_fits_case(
            Some(&gpu(None, Some(2))),
            &case_part(Some(999_999), None),
            &policy
        ));
    }

    #[test]
    fn case_without_length_limit_rejects_real_gpus() {
        let policy = FitPolicy::default();
        assert!(!gpu_fits_case(
            Some(&gpu(Some(100), Some(1))),
            &case_part(None, None),
            &policy
        ));
    }

    #[test]
    fn case_width_defaults_to_ten_slots() {
        let policy = FitPolicy::default();
        let case = case_part(Some(400), None);
        assert!(gpu_fits_case(Some(&gpu(Some(300), Some(10))), &case, &policy));
        assert!(!gpu_fits_case(Some(&gpu(Some(300), Some(11))), &case, &policy));
    }

    #[test]
    fn required_watts_without_gpu() {
        let policy = FitPolicy::default();
        assert_eq!(required_watts(&cpu(None, Some(65)), None, &policy), 215);
        // Missing TDP falls back to the default.
        assert_eq!(required_watts(&cpu(None, None), None, &policy), 215);
    }

    #[test]
    fn required_watts_with_gpu_sums_tgp_tdp_headroom() {
        let policy = FitPolicy::default();
        let mut g = gpu(None, None);
        g.tgp_w = Some(250);
        assert_eq!(
            required_watts(&cpu(None, Some(105)), Some(&g), &policy),
            250 + 105 + 200
        );
    }

    #[test]
    fn explicit_recommended_psu_overrides_derivation() {
        let policy = FitPolicy::default();
        let mut g = gpu(None, None);
        g.tgp_w = Some(250);
        g.recommended_psu_w = Some(700);
        assert_eq!(required_watts(&cpu(None, Some(105)), Some(&g), &policy), 700);
    }

    #[test]
    fn missing_tgp_uses_default() {
        let policy = FitPolicy::default();
        let g = gpu(None, None);
        assert_eq!(
            required_watts(&cpu(None, None), Some(&g), &policy),
            150 + 65 + 200
        );
    }

    #[test]
    fn psu_sufficiency_is_inclusive() {
        let mut psu = Part::new(Category::Psu, "psu");
        psu.wattage_w = Some(500);
        assert!(psu_sufficient(&psu, 500));
        assert!(!psu_sufficient(&psu, 501));
        psu.wattage_w = None;
        assert!(!psu_sufficient(&psu, 1));
    }
}

//! # Request Limits
//!
//! Boundary constants for plan requests.
//!
//! The candidate window N bounds the enumerator's input per category, which
//! bounds the join at N^6 combinations. N ≤ 20 keeps the window tractable;
//! the solver is deliberately not exhaustive over the full catalog.

/// Smallest accepted budget.
pub const MIN_BUDGET: i64 = 1_000;

/// Largest accepted per-category candidate window (N).
pub const MAX_TOP_N: usize = 20;

/// Largest accepted result cap (K).
pub const MAX_RESULTS: usize = 50;

/// Default per-category candidate window.
pub const DEFAULT_TOP_N: usize = 5;

/// Default result cap.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Largest accepted listing limit for the motherboard query.
pub const MAX_LISTING_LIMIT: usize = 200;

/// Default listing limit for the motherboard query.
pub const DEFAULT_LISTING_LIMIT: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_within_caps() {
        assert!(DEFAULT_TOP_N <= MAX_TOP_N);
        assert!(DEFAULT_MAX_RESULTS <= MAX_RESULTS);
        assert!(DEFAULT_LISTING_LIMIT <= MAX_LISTING_LIMIT);
    }
}

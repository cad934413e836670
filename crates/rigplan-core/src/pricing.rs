//! # Price Resolver
//!
//! Selects the most recent price record for a part.
//!
//! The price series is append-only and may contain duplicates; resolution
//! is a single pass over the series with a deterministic tie-break:
//!
//! 1. latest `fetched_at` wins (ISO-8601 strings compare lexicographically)
//! 2. records without a timestamp rank below timestamped ones
//! 3. among equal keys the later-appended record wins
//!
//! A part with no records (or an unknown part) resolves to the policy
//! default of 0 so that missing price data never aborts a plan.

use crate::catalog::Catalog;
use crate::{Category, PriceRecord};

/// Price used when a part has no price records at all.
pub const MISSING_PRICE: i64 = 0;

/// Resolve the current price of a part.
///
/// Pure read; one pass over the part's price series.
#[must_use]
pub fn latest_price(catalog: &Catalog, category: Category, model: &str) -> i64 {
    latest_record(catalog, category, model).map_or(MISSING_PRICE, |r| r.price)
}

/// The record `latest_price` resolves to, if any.
#[must_use]
pub fn latest_record<'a>(
    catalog: &'a Catalog,
    category: Category,
    model: &str,
) -> Option<&'a PriceRecord> {
    let mut best: Option<&PriceRecord> = None;
    for record in catalog.price_history(category, model) {
        // `>=` keeps the later-appended record on ties.
        let newer = match best {
            None => true,
            Some(current) => record.fetched_at >= current.fetched_at,
        };
        if newer {
            best = Some(record);
        }
    }
    best
}

// =============================================================================
// TESTS
// =============================================================================

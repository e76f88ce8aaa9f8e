use std::collections::HashMap;

use crate::model::{CardinalityCheck, CartBucket, ReconSummary, RowResult, TotalResult};

/// Compute summary statistics from the reconciled rows. `passed` is the run
/// verdict: clean cardinality, clean grand total, every row matched.
pub fn compute_summary(
    rows: &[RowResult],
    cardinality: &CardinalityCheck,
    grand_total: &TotalResult,
) -> ReconSummary {
    let mut bucket_counts: HashMap<String, usize> = HashMap::new();
    let mut matched = 0;
    let mut quantity_mismatches = 0;
    let mut price_mismatches = 0;
    let mut unexpected = 0;
    let mut missing = 0;

    for r in rows {
        *bucket_counts.entry(r.bucket.to_string()).or_insert(0) += 1;

        match r.bucket {
            CartBucket::Matched => matched += 1,
            CartBucket::QuantityMismatch => quantity_mismatches += 1,
            CartBucket::PriceMismatch => price_mismatches += 1,
            CartBucket::UnexpectedEntry => unexpected += 1,
            CartBucket::MissingEntry => missing += 1,
        }
    }

    let passed = cardinality.matched && grand_total.matched && matched == rows.len();

    ReconSummary {
        total_rows: rows.len(),
        matched,
        quantity_mismatches,
        price_mismatches,
        unexpected,
        missing,
        bucket_counts,
        cardinality_matched: cardinality.matched,
        grand_total_matched: grand_total.matched,
        passed,
    }
}

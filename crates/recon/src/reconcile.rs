use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::expected_grand_total;
use crate::model::{
    AggregateKey, CardinalityCheck, CartBucket, Deltas, ExpectedGroup, ObservedCartRow, RowResult,
    TotalResult,
};

/// Count check, run before any per-row comparison. Intents sharing a key
/// collapse into one cart row, so the observed row count must equal the
/// number of distinct expected keys, not the number of raw intents.
pub fn check_cardinality(
    expected: &BTreeMap<AggregateKey, ExpectedGroup>,
    observed: &[ObservedCartRow],
) -> CardinalityCheck {
    CardinalityCheck {
        expected_groups: expected.len(),
        observed_rows: observed.len(),
        matched: expected.len() == observed.len(),
    }
}

/// Match observed cart rows against the expected groups.
///
/// Every observed row produces exactly one result; expected groups no row
/// consumed are appended as missing entries in key order. The first observed
/// row for a key consumes its group; a duplicate row for the same key is an
/// unexpected entry, and the cardinality check flags the count skew
/// independently.
pub fn reconcile(
    expected: &BTreeMap<AggregateKey, ExpectedGroup>,
    observed: &[ObservedCartRow],
    tolerance_cents: i64,
) -> Vec<RowResult> {
    let mut consumed: BTreeSet<AggregateKey> = BTreeSet::new();
    let mut results = Vec::with_capacity(observed.len() + expected.len());

    for row in observed {
        let key = row.key();
        let group = match expected.get(&key) {
            Some(group) if !consumed.contains(&key) => group,
            _ => {
                results.push(RowResult {
                    bucket: CartBucket::UnexpectedEntry,
                    model: key.model,
                    color: key.color,
                    expected: None,
                    observed: Some(row.clone()),
                    deltas: Deltas {
                        quantity: None,
                        price_cents: None,
                    },
                });
                continue;
            }
        };
        consumed.insert(key);

        let quantity_delta = i64::from(row.quantity) - group.total_quantity as i64;
        let price_delta = row.line_total_cents - group.total_price_cents;

        // Quantity divergence wins: the price comparison is against the
        // wrong base once the counts differ. Both deltas are still carried.
        let bucket = if quantity_delta != 0 {
            CartBucket::QuantityMismatch
        } else if price_delta.abs() > tolerance_cents {
            CartBucket::PriceMismatch
        } else {
            CartBucket::Matched
        };

        results.push(RowResult {
            bucket,
            model: group.model.clone(),
            color: group.color.clone(),
            expected: Some(group.clone()),
            observed: Some(row.clone()),
            deltas: Deltas {
                quantity: Some(quantity_delta),
                price_cents: Some(price_delta),
            },
        });
    }

    for (key, group) in expected {
        if !consumed.contains(key) {
            results.push(RowResult {
                bucket: CartBucket::MissingEntry,
                model: group.model.clone(),
                color: group.color.clone(),
                expected: Some(group.clone()),
                observed: None,
                deltas: Deltas {
                    quantity: None,
                    price_cents: None,
                },
            });
        }
    }

    results
}

/// Compare the expected grand total against the scraped one. Independent of
/// the per-row checks even when those all pass.
pub fn reconcile_total(
    expected: &BTreeMap<AggregateKey, ExpectedGroup>,
    observed_grand_total_cents: i64,
    tolerance_cents: i64,
) -> TotalResult {
    let expected_cents = expected_grand_total(expected);
    let delta_cents = observed_grand_total_cents - expected_cents;
    TotalResult {
        expected_cents,
        observed_cents: observed_grand_total_cents,
        delta_cents,
        matched: delta_cents.abs() <= tolerance_cents,
    }
}

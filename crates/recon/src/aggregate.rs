use std::collections::BTreeMap;

use crate::model::{AggregateKey, ExpectedGroup, PricedIntent};

/// Group priced intents by case-folded (model, color); sum quantities and
/// line totals. Pure and total: empty input yields an empty map, which the
/// reconciler then treats as "nothing should be in the cart".
pub fn aggregate_intents(priced: &[PricedIntent]) -> BTreeMap<AggregateKey, ExpectedGroup> {
    let mut groups: BTreeMap<AggregateKey, ExpectedGroup> = BTreeMap::new();

    for item in priced {
        let intent = item.intent();
        let key = AggregateKey::new(&intent.model, &intent.color);
        let entry = groups.entry(key.clone()).or_insert_with(|| ExpectedGroup {
            model: key.model.clone(),
            color: key.color.clone(),
            total_quantity: 0,
            total_price_cents: 0,
            intent_count: 0,
        });
        entry.total_quantity += u64::from(intent.quantity);
        entry.total_price_cents += item.line_total_cents();
        entry.intent_count += 1;
    }

    groups
}

/// Sum of all expected group totals: the expected side of the grand-total
/// ledger. Summed in cents; rounding happened at parse time, never here.
pub fn expected_grand_total(groups: &BTreeMap<AggregateKey, ExpectedGroup>) -> i64 {
    groups.values().map(|g| g.total_price_cents).sum()
}

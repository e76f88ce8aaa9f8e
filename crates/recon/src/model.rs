use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Product category as the storefront's navigation tree spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Laptop,
    Mouse,
    Tablet,
    Headphone,
    Speaker,
}

impl Category {
    /// Exact-match parse. Casing must match the canonical name;
    /// "laptop" is a data error, not an alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Laptop" => Some(Self::Laptop),
            "Mouse" => Some(Self::Mouse),
            "Tablet" => Some(Self::Tablet),
            "Headphone" => Some(Self::Headphone),
            "Speaker" => Some(Self::Speaker),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Laptop => write!(f, "Laptop"),
            Self::Mouse => write!(f, "Mouse"),
            Self::Tablet => write!(f, "Tablet"),
            Self::Headphone => write!(f, "Headphone"),
            Self::Speaker => write!(f, "Speaker"),
        }
    }
}

/// One desired cart addition, as authored in the intent CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseIntent {
    pub category: Category,
    pub model: String,
    pub quantity: u32,
    pub color: String,
}

/// A purchase intent enriched with the unit price observed at add time.
///
/// Constructed only through `new`, which derives the line total; the
/// unit-price/line-total relationship cannot drift afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PricedIntent {
    intent: PurchaseIntent,
    unit_price_cents: i64,
    line_total_cents: i64,
}

impl PricedIntent {
    pub fn new(intent: PurchaseIntent, unit_price_cents: i64) -> Self {
        let line_total_cents = unit_price_cents * i64::from(intent.quantity);
        Self {
            intent,
            unit_price_cents,
            line_total_cents,
        }
    }

    pub fn intent(&self) -> &PurchaseIntent {
        &self.intent
    }

    pub fn unit_price_cents(&self) -> i64 {
        self.unit_price_cents
    }

    pub fn line_total_cents(&self) -> i64 {
        self.line_total_cents
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate key = (model, color), case-insensitive on both fields.
/// CSV authors and the site UI disagree on casing more often than not,
/// so both fields are folded to lowercase at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregateKey {
    pub model: String,
    pub color: String,
}

impl AggregateKey {
    pub fn new(model: &str, color: &str) -> Self {
        Self {
            model: model.trim().to_lowercase(),
            color: color.trim().to_lowercase(),
        }
    }
}

/// Expected cart line for everything sharing one (model, color).
///
/// `total_price_cents` is the sum of member line totals, never
/// `total_quantity` times any single unit price: unit prices may drift
/// between additions of the same product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedGroup {
    pub model: String,
    pub color: String,
    pub total_quantity: u64,
    pub total_price_cents: i64,
    pub intent_count: usize,
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// One rendered cart row as scraped from the storefront. Transient: captured
/// fresh each run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedCartRow {
    pub product_name: String,
    pub color: String,
    pub quantity: u32,
    pub line_total_cents: i64,
}

impl ObservedCartRow {
    pub fn key(&self) -> AggregateKey {
        AggregateKey::new(&self.product_name, &self.color)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartBucket {
    Matched,
    QuantityMismatch,
    PriceMismatch,
    UnexpectedEntry,
    MissingEntry,
}

impl std::fmt::Display for CartBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::QuantityMismatch => write!(f, "quantity_mismatch"),
            Self::PriceMismatch => write!(f, "price_mismatch"),
            Self::UnexpectedEntry => write!(f, "unexpected_entry"),
            Self::MissingEntry => write!(f, "missing_entry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deltas {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
}

/// One reconciliation outcome: an observed row matched against its expected
/// group, an observed row nothing expected (unexpected), or an expected
/// group no row covered (missing).
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub bucket: CartBucket,
    pub model: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<ObservedCartRow>,
    pub deltas: Deltas,
}

/// Observed row count vs distinct expected keys. Multiple intents sharing a
/// (model, color) collapse into one cart row, so the counts must agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardinalityCheck {
    pub expected_groups: usize,
    pub observed_rows: usize,
    pub matched: bool,
}

/// Grand-total comparison, independent of the per-row checks. Catches tax,
/// fees, or rounding artifacts that leak outside the grouping model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalResult {
    pub expected_cents: i64,
    pub observed_cents: i64,
    pub delta_cents: i64,
    pub matched: bool,
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub matched: usize,
    pub quantity_mismatches: usize,
    pub price_mismatches: usize,
    pub unexpected: usize,
    pub missing: usize,
    pub bucket_counts: HashMap<String, usize>,
    pub cardinality_matched: bool,
    pub grand_total_matched: bool,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub cardinality: CardinalityCheck,
    pub rows: Vec<RowResult>,
    pub grand_total: TotalResult,
    pub summary: ReconSummary,
}

impl ReconReport {
    pub fn passed(&self) -> bool {
        self.summary.passed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

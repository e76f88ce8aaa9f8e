use crate::loader::SkippedRow;

/// Progress events the engine emits while a run advances. Fan-out to
/// consoles, files, or CI reporters is entirely the caller's concern; the
/// engine talks to exactly one `Reporter`.
#[derive(Debug)]
pub enum RunEvent<'a> {
    IntentsLoaded {
        valid: usize,
        skipped: &'a [SkippedRow],
    },
    AddedToCart {
        model: &'a str,
        color: &'a str,
        quantity: u32,
        unit_price_cents: i64,
    },
    CartScraped {
        rows: usize,
    },
}

pub trait Reporter {
    fn event(&mut self, event: RunEvent<'_>);
}

/// Discards everything. For callers that only want the report.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn event(&mut self, _event: RunEvent<'_>) {}
}

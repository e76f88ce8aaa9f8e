use trolley_recon::money::format_cents;
use trolley_recon::report::{Reporter, RunEvent};

/// One progress line per engine event, on stderr. Stdout is reserved for the
/// JSON contract.
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn event(&mut self, event: RunEvent<'_>) {
        match event {
            RunEvent::IntentsLoaded { valid, skipped } => {
                if skipped.is_empty() {
                    eprintln!("loaded {valid} intent(s)");
                } else {
                    eprintln!("loaded {valid} intent(s), skipped {}:", skipped.len());
                    for s in skipped {
                        eprintln!("  row {}: {}", s.line, s.reason);
                    }
                }
            }
            RunEvent::AddedToCart {
                model,
                color,
                quantity,
                unit_price_cents,
            } => {
                eprintln!(
                    "  added {quantity} x {model} ({color}) @ {}",
                    format_cents(unit_price_cents)
                );
            }
            RunEvent::CartScraped { rows } => {
                eprintln!("cart has {rows} row(s)");
            }
        }
    }
}

use crate::aggregate::aggregate_intents;
use crate::config::RunConfig;
use crate::driver::{add_all, ActionStage, StorefrontGateway};
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::loader::load_intents;
use crate::model::{ReconMeta, ReconReport};
use crate::reconcile::{check_cardinality, reconcile, reconcile_total};
use crate::report::{Reporter, RunEvent};

/// Run the whole pipeline: load → drive → aggregate → scrape → reconcile.
///
/// One linear pass, no retries, no loops back to earlier stages; the first
/// hard failure ends the run. Mismatches are not errors: they come back
/// classified inside the report.
pub fn run<G: StorefrontGateway + ?Sized>(
    config: &RunConfig,
    intents_csv: &str,
    gateway: &mut G,
    reporter: &mut dyn Reporter,
) -> Result<ReconReport, ReconError> {
    let load = load_intents(intents_csv)?;
    reporter.event(RunEvent::IntentsLoaded {
        valid: load.intents.len(),
        skipped: &load.skipped,
    });

    let priced = add_all(gateway, &load.intents, reporter)?;
    let expected = aggregate_intents(&priced);

    let observed = gateway.list_cart_rows().map_err(|e| ReconError::CartInspect {
        stage: ActionStage::ListCartRows,
        cause: e.to_string(),
    })?;
    reporter.event(RunEvent::CartScraped {
        rows: observed.len(),
    });
    let observed_total = gateway.grand_total().map_err(|e| ReconError::CartInspect {
        stage: ActionStage::ReadGrandTotal,
        cause: e.to_string(),
    })?;

    let tolerance = config.tolerance.price_cents;
    let cardinality = check_cardinality(&expected, &observed);
    let rows = reconcile(&expected, &observed, tolerance);
    let grand_total = reconcile_total(&expected, observed_total, tolerance);
    let summary = compute_summary(&rows, &cardinality, &grand_total);

    Ok(ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        cardinality,
        rows,
        grand_total,
        summary,
    })
}

//! `trolley run` / `validate` / `plan` — config-driven reconciliation runs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use trolley_recon::aggregate::{aggregate_intents, expected_grand_total};
use trolley_recon::config::RunConfig;
use trolley_recon::driver::add_all;
use trolley_recon::loader::load_intents;
use trolley_recon::model::ExpectedGroup;
use trolley_recon::money::format_cents;
use trolley_recon::scripted::ScriptedStorefront;
use trolley_recon::ReconError;

use crate::exit_codes::{EXIT_CART_ACTION, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_MISMATCH};
use crate::reporter::StderrReporter;
use crate::CliError;

fn io_err(message: String) -> CliError {
    CliError {
        code: EXIT_IO,
        message,
        hint: None,
    }
}

/// Map engine errors onto the exit-code registry.
fn recon_err(err: ReconError) -> CliError {
    let code = match err {
        ReconError::CartAction { .. } | ReconError::CartInspect { .. } => EXIT_CART_ACTION,
        _ => EXIT_INVALID_CONFIG,
    };
    CliError {
        code,
        message: err.to_string(),
        hint: None,
    }
}

fn read_config(config_path: &Path) -> Result<(RunConfig, PathBuf), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| io_err(format!("cannot read config: {e}")))?;
    let config = RunConfig::from_toml(&config_str).map_err(recon_err)?;
    // Referenced files resolve relative to the config file's directory
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((config, base_dir))
}

fn read_rel(base_dir: &Path, file: &str) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path).map_err(|e| io_err(format!("cannot read {}: {e}", path.display())))
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let (config, base_dir) = read_config(&config_path)?;

    let intents_csv = read_rel(&base_dir, &config.intents.file)?;
    let price_book = read_rel(&base_dir, &config.storefront.price_book)?;
    let cart_export = read_rel(&base_dir, &config.storefront.cart_export)?;

    let mut storefront = ScriptedStorefront::new(
        &price_book,
        &cart_export,
        config.grand_total_override_cents(),
    )
    .map_err(recon_err)?;

    let report = trolley_recon::run(&config, &intents_csv, &mut storefront, &mut StderrReporter)
        .map_err(recon_err)?;

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| io_err(format!("JSON serialization error: {e}")))?;

    let output_file = output_file.or_else(|| {
        config
            .output
            .json
            .as_ref()
            .map(|file| base_dir.join(file))
    });
    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| io_err(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "cart recon '{}': {} row(s) — {} matched, {} quantity mismatches, {} price mismatches, {} unexpected, {} missing",
        config.name,
        s.total_rows,
        s.matched,
        s.quantity_mismatches,
        s.price_mismatches,
        s.unexpected,
        s.missing,
    );
    if !report.cardinality.matched {
        eprintln!(
            "cart rows: expected {} group(s), found {}",
            report.cardinality.expected_groups, report.cardinality.observed_rows,
        );
    }
    eprintln!(
        "grand total: expected {}, observed {}",
        format_cents(report.grand_total.expected_cents),
        format_cents(report.grand_total.observed_cents),
    );

    if !report.passed() {
        return Err(CliError {
            code: EXIT_MISMATCH,
            message: "mismatches found".into(),
            hint: None,
        });
    }
    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let (config, _) = read_config(&config_path)?;
    eprintln!(
        "valid: '{}' with intents {}, price book {}, cart export {}, tolerance {} cent(s)",
        config.name,
        config.intents.file,
        config.storefront.price_book,
        config.storefront.cart_export,
        config.tolerance.price_cents,
    );
    Ok(())
}

#[derive(Serialize)]
struct PlanOutput {
    config_name: String,
    groups: Vec<ExpectedGroup>,
    grand_total_cents: i64,
}

/// Price the intents against the price book and show the cart the run would
/// expect. A fixture-authoring aid: no cart export, no reconciliation.
pub fn cmd_plan(config_path: PathBuf, json_output: bool) -> Result<(), CliError> {
    let (config, base_dir) = read_config(&config_path)?;

    let intents_csv = read_rel(&base_dir, &config.intents.file)?;
    let price_book = read_rel(&base_dir, &config.storefront.price_book)?;

    let load = load_intents(&intents_csv).map_err(recon_err)?;
    if !load.skipped.is_empty() {
        eprintln!("skipped {} intent row(s):", load.skipped.len());
        for s in &load.skipped {
            eprintln!("  row {}: {}", s.line, s.reason);
        }
    }

    let mut storefront = ScriptedStorefront::with_price_book(&price_book).map_err(recon_err)?;
    let priced = add_all(
        &mut storefront,
        &load.intents,
        &mut trolley_recon::NullReporter,
    )
    .map_err(recon_err)?;
    let groups = aggregate_intents(&priced);
    let grand_total_cents = expected_grand_total(&groups);

    if json_output {
        let plan = PlanOutput {
            config_name: config.name.clone(),
            groups: groups.values().cloned().collect(),
            grand_total_cents,
        };
        let json_str = serde_json::to_string_pretty(&plan)
            .map_err(|e| io_err(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        for group in groups.values() {
            println!(
                "{:>4} x {} ({})  {}",
                group.total_quantity,
                group.model,
                group.color,
                format_cents(group.total_price_cents),
            );
        }
        println!("grand total: {}", format_cents(grand_total_cents));
    }

    eprintln!(
        "plan '{}': {} group(s) from {} intent(s)",
        config.name,
        groups.len(),
        load.intents.len(),
    );
    Ok(())
}

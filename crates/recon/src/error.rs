use std::fmt;

use crate::driver::ActionStage;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, bad grand total, missing file ref).
    ConfigValidation(String),
    /// Intent source has no header row or no data rows at all.
    MissingInput,
    /// Every data row was rejected; nothing to replay.
    NoValidIntents { skipped: usize },
    /// CSV-level read error in the intent source.
    IntentRead { line: usize, message: String },
    /// Price book row rejected.
    PriceBook { line: usize, message: String },
    /// Cart export row rejected.
    CartExport { line: usize, message: String },
    /// A gateway step failed while adding an intent. Aborts the run: a
    /// missing addition invalidates every downstream comparison.
    CartAction {
        model: String,
        color: String,
        stage: ActionStage,
        cause: String,
    },
    /// A cart-inspection call failed after all additions succeeded.
    CartInspect { stage: ActionStage, cause: String },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingInput => {
                write!(f, "intent source needs a header row and at least one data row")
            }
            Self::NoValidIntents { skipped } => {
                write!(f, "no valid purchase intents ({skipped} row(s) skipped)")
            }
            Self::IntentRead { line, message } => write!(f, "intent row {line}: {message}"),
            Self::PriceBook { line, message } => write!(f, "price book row {line}: {message}"),
            Self::CartExport { line, message } => write!(f, "cart export row {line}: {message}"),
            Self::CartAction {
                model,
                color,
                stage,
                cause,
            } => write!(f, "cart action '{stage}' failed for '{model}' ({color}): {cause}"),
            Self::CartInspect { stage, cause } => {
                write!(f, "cart inspection '{stage}' failed: {cause}")
            }
        }
    }
}

impl std::error::Error for ReconError {}

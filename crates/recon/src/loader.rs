use std::fmt;

use crate::error::ReconError;
use crate::model::{Category, PurchaseIntent};

// ---------------------------------------------------------------------------
// Skip reporting
// ---------------------------------------------------------------------------

/// Why a data row was rejected. Skips are reported, never silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields { found: usize },
    UnknownCategory(String),
    BadQuantity(String),
    EmptyField(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => write!(f, "expected 4 fields, found {found}"),
            Self::UnknownCategory(value) => write!(f, "unknown category '{value}'"),
            Self::BadQuantity(value) => {
                write!(f, "quantity '{value}' is not a positive integer")
            }
            Self::EmptyField(field) => write!(f, "empty {field}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data-row number (header excluded).
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub struct IntentLoad {
    pub intents: Vec<PurchaseIntent>,
    pub skipped: Vec<SkippedRow>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse the intent CSV into purchase intents, preserving file order.
///
/// Columns are positional (`Category, Model, Quantity, Color`); the header
/// row is required but its names are ignored. Fields are trimmed.
/// Malformed rows are skipped with a reason rather than aborting the load:
/// intent files are hand-edited test data and a single typo should not kill
/// the run. Zero valid rows after validation is fatal, though, since there
/// is nothing to test.
pub fn load_intents(csv_data: &str) -> Result<IntentLoad, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ReconError::IntentRead {
            line: 0,
            message: e.to_string(),
        })?
        .clone();
    if headers.len() == 0 || (headers.len() == 1 && headers.get(0).unwrap_or("").trim().is_empty())
    {
        return Err(ReconError::MissingInput);
    }

    let mut intents = Vec::new();
    let mut skipped = Vec::new();
    let mut data_rows = 0usize;

    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let record = record.map_err(|e| ReconError::IntentRead {
            line,
            message: e.to_string(),
        })?;

        // The csv reader drops genuinely blank lines; a line of stray
        // whitespace still shows up as a single empty field.
        if record.len() == 1 && record.get(0).unwrap_or("").trim().is_empty() {
            continue;
        }
        data_rows += 1;

        if record.len() < 4 {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::TooFewFields { found: record.len() },
            });
            continue;
        }

        let category_raw = record.get(0).unwrap_or("").trim();
        let model = record.get(1).unwrap_or("").trim();
        let quantity_raw = record.get(2).unwrap_or("").trim();
        let color = record.get(3).unwrap_or("").trim();

        let Some(category) = Category::parse(category_raw) else {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::UnknownCategory(category_raw.to_string()),
            });
            continue;
        };

        let quantity = match quantity_raw.parse::<u32>() {
            Ok(q) if q > 0 => q,
            _ => {
                skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::BadQuantity(quantity_raw.to_string()),
                });
                continue;
            }
        };

        if model.is_empty() {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::EmptyField("model"),
            });
            continue;
        }
        if color.is_empty() {
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::EmptyField("color"),
            });
            continue;
        }

        intents.push(PurchaseIntent {
            category,
            model: model.to_string(),
            quantity,
            color: color.to_string(),
        });
    }

    if data_rows == 0 {
        return Err(ReconError::MissingInput);
    }
    if intents.is_empty() {
        return Err(ReconError::NoValidIntents {
            skipped: skipped.len(),
        });
    }

    Ok(IntentLoad { intents, skipped })
}

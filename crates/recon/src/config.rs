use serde::Deserialize;

use crate::error::ReconError;
use crate::money;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub intents: IntentsConfig,
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentsConfig {
    pub file: String,
}

/// Scripted storefront inputs. `grand_total` overrides the cart export's row
/// sum so fixtures can model a summary line that disagrees with the rows.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    pub price_book: String,
    pub cart_export: String,
    #[serde(default)]
    pub grand_total: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Allowed per-row and grand-total price drift. 0 = exact after rounding.
    #[serde(default)]
    pub price_cents: i64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { price_cents: 0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }
        for (field, value) in [
            ("intents.file", &self.intents.file),
            ("storefront.price_book", &self.storefront.price_book),
            ("storefront.cart_export", &self.storefront.cart_export),
        ] {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if self.tolerance.price_cents < 0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance.price_cents must be >= 0, got {}",
                self.tolerance.price_cents
            )));
        }
        if let Some(ref raw) = self.storefront.grand_total {
            if money::parse_price(raw).is_none() {
                return Err(ReconError::ConfigValidation(format!(
                    "storefront.grand_total '{raw}' is not a price"
                )));
            }
        }
        Ok(())
    }

    /// The grand-total override in cents, when configured. `validate` has
    /// already rejected unparseable values.
    pub fn grand_total_override_cents(&self) -> Option<i64> {
        self.storefront
            .grand_total
            .as_deref()
            .and_then(money::parse_price)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Nightly storefront check"

[intents]
file = "intents.csv"

[storefront]
price_book  = "prices.csv"
cart_export = "cart.csv"
"#;

    #[test]
    fn parse_valid_with_defaults() {
        let config = RunConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Nightly storefront check");
        assert_eq!(config.intents.file, "intents.csv");
        assert_eq!(config.tolerance.price_cents, 0);
        assert!(config.output.json.is_none());
        assert!(config.grand_total_override_cents().is_none());
    }

    #[test]
    fn parse_full() {
        let input = format!(
            r#"{VALID}
grand_total = "$2,426.47"

[tolerance]
price_cents = 2

[output]
json = "report.json"
"#
        );
        // grand_total belongs to [storefront]; appending after it keeps the table
        let config = RunConfig::from_toml(&input).unwrap();
        assert_eq!(config.tolerance.price_cents, 2);
        assert_eq!(config.output.json.as_deref(), Some("report.json"));
        assert_eq!(config.grand_total_override_cents(), Some(242_647));
    }

    #[test]
    fn reject_empty_name() {
        let input = VALID.replace("Nightly storefront check", "  ");
        let err = RunConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn reject_empty_file_reference() {
        let input = VALID.replace("prices.csv", "");
        let err = RunConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("price_book"));
    }

    #[test]
    fn reject_negative_tolerance() {
        let input = format!(
            r#"{VALID}
[tolerance]
price_cents = -1
"#
        );
        let err = RunConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("price_cents"));
    }

    #[test]
    fn reject_unparseable_grand_total() {
        let input = format!(
            r#"{VALID}
grand_total = "about twelve"
"#
        );
        let err = RunConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("grand_total"));
    }

    #[test]
    fn reject_missing_section() {
        let err = RunConfig::from_toml("name = \"x\"").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }
}

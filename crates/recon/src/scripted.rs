use std::collections::HashMap;

use crate::driver::{GatewayError, StorefrontGateway};
use crate::error::ReconError;
use crate::model::{Category, ObservedCartRow};
use crate::money;

/// File-driven storefront: prices come from a price book CSV, the cart from
/// an exported cart CSV. Used by the CLI and by integration tests in place
/// of a live browser session.
///
/// Selection state mirrors a real storefront's shared navigation: category,
/// product and color must be chosen in order, the price label only exists
/// once a color is selected, and confirming clears the selection. Getting a
/// step out of order fails the same way a scraper would.
pub struct ScriptedStorefront {
    prices: HashMap<(Category, String, String), i64>,
    cart_rows: Vec<ObservedCartRow>,
    grand_total_cents: i64,
    category: Option<Category>,
    product: Option<String>,
    color: Option<String>,
    pending_quantity: Option<u32>,
}

impl ScriptedStorefront {
    /// Parse both fixture files. Unlike the intent loader, fixtures are
    /// curated inputs: any bad row is an error, not a skip.
    pub fn new(
        price_book_csv: &str,
        cart_export_csv: &str,
        grand_total_override_cents: Option<i64>,
    ) -> Result<Self, ReconError> {
        let prices = parse_price_book(price_book_csv)?;
        let cart_rows = parse_cart_export(cart_export_csv)?;
        let grand_total_cents = grand_total_override_cents
            .unwrap_or_else(|| cart_rows.iter().map(|r| r.line_total_cents).sum());
        Ok(Self {
            prices,
            cart_rows,
            grand_total_cents,
            category: None,
            product: None,
            color: None,
            pending_quantity: None,
        })
    }

    /// Price book only, with an empty cart. For pricing intents without a
    /// cart to reconcile against (`trolley plan`).
    pub fn with_price_book(price_book_csv: &str) -> Result<Self, ReconError> {
        Self::new(price_book_csv, "Product,Color,Quantity,LineTotal\n", None)
    }
}

/// Columns: `Category, Model, Color, UnitPrice` (positional, header required).
fn parse_price_book(
    csv_data: &str,
) -> Result<HashMap<(Category, String, String), i64>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let mut prices = HashMap::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let bad = |message: String| ReconError::PriceBook { line, message };
        let record = record.map_err(|e| bad(e.to_string()))?;
        if record.len() < 4 {
            return Err(bad(format!("expected 4 fields, found {}", record.len())));
        }

        let category_raw = record.get(0).unwrap_or("").trim();
        let category = Category::parse(category_raw)
            .ok_or_else(|| bad(format!("unknown category '{category_raw}'")))?;
        let model = record.get(1).unwrap_or("").trim().to_lowercase();
        let color = record.get(2).unwrap_or("").trim().to_lowercase();
        let price_raw = record.get(3).unwrap_or("").trim();
        let unit_price_cents = money::parse_price(price_raw)
            .ok_or_else(|| bad(format!("'{price_raw}' is not a price")))?;

        prices.insert((category, model, color), unit_price_cents);
    }
    Ok(prices)
}

/// Columns: `Product, Color, Quantity, LineTotal` (positional, header required).
fn parse_cart_export(csv_data: &str) -> Result<Vec<ObservedCartRow>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let bad = |message: String| ReconError::CartExport { line, message };
        let record = record.map_err(|e| bad(e.to_string()))?;
        if record.len() < 4 {
            return Err(bad(format!("expected 4 fields, found {}", record.len())));
        }

        let product_name = record.get(0).unwrap_or("").trim().to_string();
        let color = record.get(1).unwrap_or("").trim().to_string();
        let quantity_raw = record.get(2).unwrap_or("").trim();
        let quantity: u32 = quantity_raw
            .parse()
            .map_err(|_| bad(format!("quantity '{quantity_raw}' is not an integer")))?;
        let total_raw = record.get(3).unwrap_or("").trim();
        let line_total_cents = money::parse_price(total_raw)
            .ok_or_else(|| bad(format!("'{total_raw}' is not a price")))?;

        rows.push(ObservedCartRow {
            product_name,
            color,
            quantity,
            line_total_cents,
        });
    }
    Ok(rows)
}

impl StorefrontGateway for ScriptedStorefront {
    fn navigate_to_category(&mut self, category: Category) -> Result<(), GatewayError> {
        // Navigation drops any in-flight selection
        self.category = Some(category);
        self.product = None;
        self.color = None;
        self.pending_quantity = None;
        Ok(())
    }

    fn select_product(&mut self, model: &str) -> Result<(), GatewayError> {
        let Some(category) = self.category else {
            return Err(GatewayError::UnexpectedState("no category page open".into()));
        };
        let model = model.trim().to_lowercase();
        let listed = self
            .prices
            .keys()
            .any(|(c, m, _)| *c == category && *m == model);
        if !listed {
            return Err(GatewayError::ElementNotFound(format!(
                "product '{model}' in category {category}"
            )));
        }
        self.product = Some(model);
        self.color = None;
        self.pending_quantity = None;
        Ok(())
    }

    fn select_color(&mut self, color: &str) -> Result<(), GatewayError> {
        let (Some(category), Some(product)) = (self.category, self.product.as_ref()) else {
            return Err(GatewayError::UnexpectedState("no product page open".into()));
        };
        let color = color.trim().to_lowercase();
        if !self
            .prices
            .contains_key(&(category, product.clone(), color.clone()))
        {
            return Err(GatewayError::ElementNotFound(format!(
                "color swatch '{color}' for '{product}'"
            )));
        }
        self.color = Some(color);
        Ok(())
    }

    fn displayed_unit_price(&mut self) -> Result<i64, GatewayError> {
        let (Some(category), Some(product), Some(color)) =
            (self.category, self.product.as_ref(), self.color.as_ref())
        else {
            return Err(GatewayError::UnexpectedState(
                "price label needs a full selection".into(),
            ));
        };
        self.prices
            .get(&(category, product.clone(), color.clone()))
            .copied()
            .ok_or_else(|| GatewayError::ElementNotFound("price label".into()))
    }

    fn set_quantity(&mut self, quantity: u32) -> Result<(), GatewayError> {
        if self.color.is_none() {
            return Err(GatewayError::UnexpectedState(
                "quantity field needs a full selection".into(),
            ));
        }
        if quantity == 0 {
            return Err(GatewayError::UnexpectedState(
                "quantity field rejects 0".into(),
            ));
        }
        self.pending_quantity = Some(quantity);
        Ok(())
    }

    fn confirm_add_to_cart(&mut self) -> Result<(), GatewayError> {
        if self.product.is_none() || self.color.is_none() || self.pending_quantity.is_none() {
            return Err(GatewayError::UnexpectedState(
                "add-to-cart needs product, color and quantity".into(),
            ));
        }
        // Back on the category page after the confirmation toast
        self.product = None;
        self.color = None;
        self.pending_quantity = None;
        Ok(())
    }

    fn list_cart_rows(&mut self) -> Result<Vec<ObservedCartRow>, GatewayError> {
        Ok(self.cart_rows.clone())
    }

    fn grand_total(&mut self) -> Result<i64, GatewayError> {
        Ok(self.grand_total_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: &str = "\
Category,Model,Color,UnitPrice
Laptop,Aspire 3,Gray,$379.00
Laptop,Aspire 3,Black,379.00
Mouse,MX Anywhere,Black,79.99
";

    const CART: &str = "\
Product,Color,Quantity,LineTotal
Aspire 3,Gray,1,379.00
MX Anywhere,Black,3,239.97
";

    fn storefront() -> ScriptedStorefront {
        ScriptedStorefront::new(PRICES, CART, None).unwrap()
    }

    #[test]
    fn full_selection_reads_the_price() {
        let mut s = storefront();
        s.navigate_to_category(Category::Laptop).unwrap();
        s.select_product("Aspire 3").unwrap();
        s.select_color("GRAY").unwrap();
        assert_eq!(s.displayed_unit_price().unwrap(), 37_900);
        s.set_quantity(2).unwrap();
        s.confirm_add_to_cart().unwrap();
    }

    #[test]
    fn out_of_order_steps_fail() {
        let mut s = storefront();
        assert!(matches!(
            s.select_product("Aspire 3"),
            Err(GatewayError::UnexpectedState(_))
        ));
        s.navigate_to_category(Category::Laptop).unwrap();
        assert!(matches!(
            s.displayed_unit_price(),
            Err(GatewayError::UnexpectedState(_))
        ));
        assert!(matches!(
            s.confirm_add_to_cart(),
            Err(GatewayError::UnexpectedState(_))
        ));
    }

    #[test]
    fn unknown_product_and_color_are_not_found() {
        let mut s = storefront();
        s.navigate_to_category(Category::Laptop).unwrap();
        assert!(matches!(
            s.select_product("Slate 8"),
            Err(GatewayError::ElementNotFound(_))
        ));
        s.select_product("Aspire 3").unwrap();
        assert!(matches!(
            s.select_color("Purple"),
            Err(GatewayError::ElementNotFound(_))
        ));
    }

    #[test]
    fn product_listing_is_per_category() {
        let mut s = storefront();
        s.navigate_to_category(Category::Mouse).unwrap();
        assert!(matches!(
            s.select_product("Aspire 3"),
            Err(GatewayError::ElementNotFound(_))
        ));
    }

    #[test]
    fn confirm_clears_the_selection() {
        let mut s = storefront();
        s.navigate_to_category(Category::Laptop).unwrap();
        s.select_product("Aspire 3").unwrap();
        s.select_color("Black").unwrap();
        s.set_quantity(1).unwrap();
        s.confirm_add_to_cart().unwrap();
        assert!(matches!(
            s.confirm_add_to_cart(),
            Err(GatewayError::UnexpectedState(_))
        ));
    }

    #[test]
    fn cart_rows_and_total_come_from_the_export() {
        let mut s = storefront();
        let rows = s.list_cart_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "Aspire 3");
        assert_eq!(rows[1].line_total_cents, 23_997);
        assert_eq!(s.grand_total().unwrap(), 37_900 + 23_997);
    }

    #[test]
    fn grand_total_override_wins() {
        let mut s = ScriptedStorefront::new(PRICES, CART, Some(70_000)).unwrap();
        assert_eq!(s.grand_total().unwrap(), 70_000);
    }

    #[test]
    fn bad_fixture_rows_are_errors_not_skips() {
        let bad_prices = "\
Category,Model,Color,UnitPrice
Laptop,Aspire 3,Gray,cheap
";
        match ScriptedStorefront::new(bad_prices, CART, None).err() {
            Some(ReconError::PriceBook { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected PriceBook error, got {other:?}"),
        }

        let bad_cart = "\
Product,Color,Quantity,LineTotal
Aspire 3,Gray,one,379.00
";
        match ScriptedStorefront::new(PRICES, bad_cart, None).err() {
            Some(ReconError::CartExport { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected CartExport error, got {other:?}"),
        }
    }
}

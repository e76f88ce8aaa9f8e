use std::fmt;

use serde::Serialize;

use crate::error::ReconError;
use crate::model::{Category, ObservedCartRow, PricedIntent, PurchaseIntent};
use crate::report::{Reporter, RunEvent};

// ---------------------------------------------------------------------------
// Gateway seam
// ---------------------------------------------------------------------------

/// Where in the add-to-cart sequence a gateway call sits. Carried on
/// `ReconError::CartAction` so a failure names the exact step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStage {
    NavigateToCategory,
    SelectProduct,
    SelectColor,
    ReadPrice,
    SetQuantity,
    ConfirmAddToCart,
    ListCartRows,
    ReadGrandTotal,
}

impl fmt::Display for ActionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NavigateToCategory => write!(f, "navigate_to_category"),
            Self::SelectProduct => write!(f, "select_product"),
            Self::SelectColor => write!(f, "select_color"),
            Self::ReadPrice => write!(f, "read_price"),
            Self::SetQuantity => write!(f, "set_quantity"),
            Self::ConfirmAddToCart => write!(f, "confirm_add_to_cart"),
            Self::ListCartRows => write!(f, "list_cart_rows"),
            Self::ReadGrandTotal => write!(f, "read_grand_total"),
        }
    }
}

/// Gateway-side failure. Retry and recovery (re-navigating a flaky page,
/// waiting out a spinner) live behind the gateway; by the time one of these
/// reaches the driver the run is over.
#[derive(Debug, Clone)]
pub enum GatewayError {
    ElementNotFound(String),
    Timeout(String),
    UnexpectedState(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementNotFound(what) => write!(f, "element not found: {what}"),
            Self::Timeout(what) => write!(f, "timed out: {what}"),
            Self::UnexpectedState(what) => write!(f, "unexpected page state: {what}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Capability interface over the remote storefront, the sole seam to
/// browser/HTTP mechanics. Prices are integer cents.
pub trait StorefrontGateway {
    fn navigate_to_category(&mut self, category: Category) -> Result<(), GatewayError>;
    fn select_product(&mut self, model: &str) -> Result<(), GatewayError>;
    fn select_color(&mut self, color: &str) -> Result<(), GatewayError>;
    fn displayed_unit_price(&mut self) -> Result<i64, GatewayError>;
    fn set_quantity(&mut self, quantity: u32) -> Result<(), GatewayError>;
    fn confirm_add_to_cart(&mut self) -> Result<(), GatewayError>;
    fn list_cart_rows(&mut self) -> Result<Vec<ObservedCartRow>, GatewayError>;
    fn grand_total(&mut self) -> Result<i64, GatewayError>;
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Replay one intent against the storefront.
///
/// The unit price is read before the quantity is set so it can never be a
/// subtotal; the line total is computed here and never trusted from the
/// gateway.
pub fn add_to_cart<G: StorefrontGateway + ?Sized>(
    gateway: &mut G,
    intent: &PurchaseIntent,
) -> Result<PricedIntent, ReconError> {
    let fail = |stage: ActionStage, cause: GatewayError| ReconError::CartAction {
        model: intent.model.clone(),
        color: intent.color.clone(),
        stage,
        cause: cause.to_string(),
    };

    gateway
        .navigate_to_category(intent.category)
        .map_err(|e| fail(ActionStage::NavigateToCategory, e))?;
    gateway
        .select_product(&intent.model)
        .map_err(|e| fail(ActionStage::SelectProduct, e))?;
    gateway
        .select_color(&intent.color)
        .map_err(|e| fail(ActionStage::SelectColor, e))?;
    let unit_price_cents = gateway
        .displayed_unit_price()
        .map_err(|e| fail(ActionStage::ReadPrice, e))?;
    gateway
        .set_quantity(intent.quantity)
        .map_err(|e| fail(ActionStage::SetQuantity, e))?;
    gateway
        .confirm_add_to_cart()
        .map_err(|e| fail(ActionStage::ConfirmAddToCart, e))?;

    Ok(PricedIntent::new(intent.clone(), unit_price_cents))
}

/// Replay every intent, strictly one at a time in loader order. The gateway
/// holds shared navigation state, so there is nothing to parallelize. The
/// first failing step aborts the whole run: no partial retry, no silent
/// skip.
pub fn add_all<G: StorefrontGateway + ?Sized>(
    gateway: &mut G,
    intents: &[PurchaseIntent],
    reporter: &mut dyn Reporter,
) -> Result<Vec<PricedIntent>, ReconError> {
    let mut priced = Vec::with_capacity(intents.len());
    for intent in intents {
        let item = add_to_cart(gateway, intent)?;
        reporter.event(RunEvent::AddedToCart {
            model: &intent.model,
            color: &intent.color,
            quantity: intent.quantity,
            unit_price_cents: item.unit_price_cents(),
        });
        priced.push(item);
    }
    Ok(priced)
}

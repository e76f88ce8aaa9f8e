//! `trolley-recon` — CSV-driven cart reconciliation engine.
//!
//! Pure engine crate: replays purchase intents through an injected storefront
//! gateway, aggregates them by (model, color) and reconciles the observed
//! cart against that expectation. No file IO or CLI dependencies; callers
//! hand in strings and a gateway.

pub mod aggregate;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod loader;
pub mod model;
pub mod money;
pub mod reconcile;
pub mod report;
pub mod scripted;

pub use config::RunConfig;
pub use driver::{GatewayError, StorefrontGateway};
pub use engine::run;
pub use error::ReconError;
pub use model::{ObservedCartRow, PurchaseIntent, ReconReport};
pub use report::{NullReporter, Reporter};
pub use scripted::ScriptedStorefront;

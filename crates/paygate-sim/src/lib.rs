//! Mock request/response simulation engine for a USDT payment-gateway API
//! console.
//!
//! No network call is ever made. A user picks an endpoint from the
//! [`EndpointCatalog`], edits a JSON body, and the [`SimulationController`]
//! produces a [`ResponseEnvelope`] from the [`MockResponseGenerator`] after a
//! fixed, configurable latency. [`SessionState`] tracks the selection, body,
//! last response and copy marker for one user.
//!
//! # Example
//!
//! ```
//! use paygate_sim::{EndpointCatalog, SessionState, SimulationController, SimulatorConfig};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let config = SimulatorConfig { latency_ms: 0, ..Default::default() };
//! let catalog = Arc::new(config.load_catalog()?);
//! let controller = SimulationController::new(catalog.clone(), &config);
//!
//! let mut session = SessionState::new(catalog);
//! session.select("cancel")?;
//! session.edit_body(r#"{"invoiceId":"inv_999"}"#);
//!
//! let response = controller.run_session(&mut session).await?;
//! assert_eq!(response.status, 200);
//! assert_eq!(response.data["status"], "cancelled");
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod controller;
mod generator;
mod session;
mod source;
mod types;

pub use catalog::{CatalogError, EndpointCatalog};
pub use config::{SimulatorConfig, DEFAULT_COPY_HIGHLIGHT_MS};
pub use controller::SimulationController;
pub use generator::{
    GenerateError, MockResponseGenerator, DEFAULT_AMOUNT, DEFAULT_CURRENCY, DEFAULT_EVENT,
    DEFAULT_INVOICE_ID, DEFAULT_MERCHANT_ID, DEFAULT_REFUND_AMOUNT, DEFAULT_REFUND_REASON,
    PLACEHOLDER_QR, SEED_PHRASE,
};
pub use session::{PendingTest, SessionError, SessionPhase, SessionState};
pub use source::{
    format_timestamp, Clock, FixedClock, FixedIdSource, IdSource, SystemClock, ThreadRngIdSource,
};
pub use types::{EndpointDescriptor, ResponseEnvelope};

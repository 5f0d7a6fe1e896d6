//! # tiffin-orders: Submission, Lifecycle & Polling
//!
//! The async boundary of the Tiffin storefront. Everything here talks to the
//! backend through capability ports; the wire format and transport belong to
//! the API collaborator.
//!
//! ## Modules
//!
//! - [`api`] - Capability ports (`CatalogApi`, `OrderApi`, `Session`),
//!   request/response shapes, and the backend failure classifier
//! - [`submit`] - The checkout pipeline: validate, ship, clear on success
//! - [`lifecycle`] - Staff status updates gated by the lifecycle graph
//! - [`monitor`] - Fixed-interval polling of a customer's order list
//! - [`error`] - The order error taxonomy
//!
//! ## Example
//! ```rust,ignore
//! let submitter = OrderSubmitter::new(api.clone(), session);
//! let receipt = submitter
//!     .submit(&mut store, "12 MG Road, Pune", "+91 98765 43210")
//!     .await?;
//! println!("order {} placed", receipt.order_number);
//! ```

pub mod api;
pub mod error;
pub mod lifecycle;
pub mod monitor;
pub mod submit;

pub use api::{
    ApiErrorKind, ApiFailure, CatalogApi, OrderApi, OrderItemPayload, OrderPayload,
    OrderReceipt, OrderSummary, OrderSummaryItem, Session, StaticSession,
};
pub use error::{OrderError, OrderResult};
pub use lifecycle::StatusUpdater;
pub use monitor::{MonitorConfig, MonitorHandle, OrderFeed, OrderMonitor};
pub use submit::OrderSubmitter;

//! # tiffin-core: Pure Business Logic for Tiffin
//!
//! This crate is the **heart** of the Tiffin storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tiffin Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (out of scope)                   │   │
//! │  │    Menu pages ──► Cart view ──► Checkout ──► Order tracking    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     tiffin-cart (durable store)     tiffin-orders (async)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiffin-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │  │  money  │ │ catalog │ │ billing │ │  cart   │ │  status  │ │   │
//! │  │  │  Money  │ │ Pricing │ │FeePolicy│ │CartLine │ │Lifecycle │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Menu item types and the price resolution rules
//! - [`billing`] - Fee policy and the billing breakdown calculator
//! - [`cart`] - Cart value type and its invariants
//! - [`status`] - Order status state machine and display labels
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout field validation

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod status;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tiffin_core::Money` instead of
// `use tiffin_core::money::Money`

pub use billing::{compute_breakdown, BillingBreakdown, FeePolicy};
pub use cart::{Cart, CartLine};
pub use catalog::{CatalogItem, Pricing};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use status::{validate_transition, OrderStatus};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Keeps runaway carts (and the persisted document) at a reasonable size.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches obvious typos (1000 instead of 10) before checkout.
pub const MAX_LINE_QUANTITY: i64 = 999;

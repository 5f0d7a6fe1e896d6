//! # tiffin-cart: Durable Cart Store
//!
//! Holds the customer's cart across application restarts.
//!
//! The cart is the only durable local state in the system: orders live
//! behind the backend API, and the menu is fetched on demand. This crate
//! owns the storage seam ([`storage::CartStorage`]), the store itself
//! ([`store::CartStore`]), and the shared handle used to inject one store
//! into every customer view ([`store::SharedCartStore`]).
//!
//! ## Guarantees
//! - `CartStore::load` always yields a usable store; corruption resets to an
//!   empty cart and is logged, never surfaced.
//! - Every mutation persists before returning.
//! - The cart invariants of `tiffin-core` hold for every observable state.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tiffin_cart::{CartStore, MemoryStorage};
//! use tiffin_core::billing::FeePolicy;
//! use tiffin_core::catalog::{CatalogItem, Pricing};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let mut store = CartStore::load(storage, FeePolicy::default());
//!
//! let item = CatalogItem {
//!     id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
//!     name: "Masala Dosa".to_string(),
//!     available: true,
//!     pricing: Pricing::single(9000),
//!     image_url: None,
//! };
//!
//! store.add(&item, 2, None, None).unwrap();
//! assert_eq!(store.breakdown().subtotal_paise, 18000);
//! ```

pub mod error;
pub mod storage;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::{CartStore, SharedCartStore};

//! # Cart Store
//!
//! Owns the current cart and keeps it durable across application restarts.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Store Operation          Persisted Document  │
//! │  ─────────                ───────────────          ──────────────────  │
//! │                                                                         │
//! │  App start ─────────────► CartStore::load() ─────► read (recover on    │
//! │                                                    corruption)          │
//! │  Tap menu item ─────────► add() ─────────────────► write               │
//! │  Change quantity ───────► update_quantity() ─────► write               │
//! │  Tap remove ────────────► remove() ──────────────► write               │
//! │  Order placed ──────────► clear() ───────────────► delete              │
//! │  Cart view ─────────────► breakdown() ───────────► (read only,         │
//! │                                                    recomputed)          │
//! │                                                                         │
//! │  Every mutation persists before returning, so the document always      │
//! │  reflects the last completed operation.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is one logical writer: the current user's own UI. The shared handle
//! below serializes access from multiple views of the same session.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use tiffin_core::billing::{compute_breakdown, BillingBreakdown, FeePolicy};
use tiffin_core::cart::{Cart, CartLine};
use tiffin_core::catalog::CatalogItem;
use tiffin_core::validation::validate_instructions;

use crate::error::StoreResult;
use crate::storage::CartStorage;

// =============================================================================
// Cart Store
// =============================================================================

/// The durable cart store.
///
/// Explicitly owned and injected into whichever view needs it; all mutation
/// funnels through these operations, so the cart invariants (line
/// uniqueness, quantity floor) hold for every observable state.
pub struct CartStore {
    cart: Cart,
    policy: FeePolicy,
    storage: Arc<dyn CartStorage>,
}

impl CartStore {
    /// Loads the cart from durable storage.
    ///
    /// Guaranteed to produce a usable store: a missing, unreadable, or
    /// malformed document (including one violating cart invariants) resets
    /// to an empty cart with a warning instead of propagating an error.
    pub fn load(storage: Arc<dyn CartStorage>, policy: FeePolicy) -> Self {
        let cart = match storage.read() {
            Ok(Some(document)) => match Self::parse_document(&document) {
                Ok(cart) => {
                    debug!(lines = cart.line_count(), "cart restored from storage");
                    cart
                }
                Err(reason) => {
                    warn!(%reason, "stored cart is corrupt, resetting to empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "cart storage unreadable, resetting to empty");
                Cart::new()
            }
        };

        CartStore {
            cart,
            policy,
            storage,
        }
    }

    fn parse_document(document: &str) -> Result<Cart, String> {
        let lines: Vec<CartLine> =
            serde_json::from_str(document).map_err(|e| e.to_string())?;
        Cart::from_lines(lines).map_err(|e| e.to_string())
    }

    /// Adds a catalog item to the cart and persists.
    ///
    /// Unavailable items are rejected with the cart left unchanged; the
    /// unit price of a newly created line is snapshotted here and never
    /// recomputed from a live menu.
    pub fn add(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
        variation: Option<&str>,
        special_instructions: Option<String>,
    ) -> StoreResult<()> {
        debug!(item_id = %item.id, quantity, ?variation, "cart add");

        if let Some(note) = special_instructions.as_deref() {
            validate_instructions(note).map_err(tiffin_core::CoreError::from)?;
        }

        if let Err(e) = self
            .cart
            .add_item(item, quantity, variation, special_instructions)
        {
            warn!(item_id = %item.id, error = %e, "cart add rejected");
            return Err(e.into());
        }

        self.persist()
    }

    /// Removes the matching line, if present, and persists.
    pub fn remove(&mut self, item_id: &str, variation: Option<&str>) -> StoreResult<()> {
        debug!(%item_id, ?variation, "cart remove");

        if self.cart.remove_line(item_id, variation) {
            self.persist()
        } else {
            Ok(())
        }
    }

    /// Sets a line's quantity and persists; zero or below removes the line.
    pub fn update_quantity(
        &mut self,
        item_id: &str,
        variation: Option<&str>,
        quantity: i64,
    ) -> StoreResult<()> {
        debug!(%item_id, ?variation, quantity, "cart update quantity");

        self.cart.update_quantity(item_id, variation, quantity)?;
        self.persist()
    }

    /// Empties the cart and removes the stored document.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.cart.clear();
        self.storage.delete()?;
        info!("cart cleared");
        Ok(())
    }

    /// Computes the billing breakdown for the current lines.
    ///
    /// Recomputed on every call; nothing is cached.
    pub fn breakdown(&self) -> BillingBreakdown {
        compute_breakdown(self.cart.lines(), &self.policy)
    }

    /// The current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The fee policy this store bills with.
    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Writes the current lines to durable storage.
    fn persist(&self) -> StoreResult<()> {
        let document = serde_json::to_string(self.cart.lines())?;
        self.storage.write(&document)?;
        Ok(())
    }
}

// =============================================================================
// Shared Handle
// =============================================================================

/// Cloneable handle sharing one `CartStore` across views.
///
/// `Arc<Mutex<..>>` because several views of the same session read and
/// mutate the cart, and only one may do so at a time.
#[derive(Clone)]
pub struct SharedCartStore {
    inner: Arc<Mutex<CartStore>>,
}

impl SharedCartStore {
    /// Wraps a store for shared access.
    pub fn new(store: CartStore) -> Self {
        SharedCartStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let breakdown = shared.with_store(|s| s.breakdown());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.inner.lock().expect("cart store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|s| s.add(&item, 1, None, None))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.inner.lock().expect("cart store mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

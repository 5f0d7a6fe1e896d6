//! # Order Submission Pipeline
//!
//! Validates a cart and hands it to the order submission capability.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Submission                                    │
//! │                                                                         │
//! │  submit(store, address, phone)                                          │
//! │       │                                                                 │
//! │       ├── cart empty?            → EmptyCart                            │
//! │       ├── line ids well-formed?  → InvalidCartLine                      │
//! │       ├── address / phone given? → MissingDeliveryInfo                  │
//! │       ├── session resolvable?    → NotAuthenticated                     │
//! │       │     (all checks run BEFORE any network call)                    │
//! │       ▼                                                                 │
//! │  OrderApi::create_order(payload)                                        │
//! │       │                                                                 │
//! │       ├── Ok(receipt)  → clear cart, return order number                │
//! │       │                                                                 │
//! │       └── Err          → cart PRESERVED, error classified:              │
//! │             ItemsNoLongerAvailable | Rejected | Transport               │
//! │                                                                         │
//! │  The cart is cleared only on an explicit success response. A timeout   │
//! │  never wipes it: better a duplicate confirmation screen than a paid-   │
//! │  for order the customer cannot see.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no automatic retry; submission is user-initiated and retried
//! only by explicit resubmission.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tiffin_cart::CartStore;
use tiffin_core::validation::{validate_delivery_address, validate_id, validate_phone};
use tiffin_core::CoreError;

use crate::api::{OrderApi, OrderItemPayload, OrderPayload, OrderReceipt, Session};
use crate::error::{OrderError, OrderResult};

/// The checkout pipeline: validation, payload shaping, hand-off.
pub struct OrderSubmitter {
    api: Arc<dyn OrderApi>,
    session: Arc<dyn Session>,
}

impl OrderSubmitter {
    /// Creates a submitter over the order capability and the current session.
    pub fn new(api: Arc<dyn OrderApi>, session: Arc<dyn Session>) -> Self {
        OrderSubmitter { api, session }
    }

    /// Submits the cart as an order.
    ///
    /// On success the cart store is cleared before returning, so the same
    /// cart cannot be submitted twice. On any failure the cart is left
    /// exactly as it was.
    pub async fn submit(
        &self,
        store: &mut CartStore,
        delivery_address: &str,
        phone: &str,
    ) -> OrderResult<OrderReceipt> {
        debug!(lines = store.cart().line_count(), "submit requested");

        if store.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        // A persisted cart can outlive the menu it was built from; an id
        // that could never resolve means the document predates a catalog
        // wipe or was tampered with.
        for line in store.cart().lines() {
            if validate_id(&line.item_id).is_err() {
                return Err(OrderError::InvalidCartLine {
                    item_id: line.item_id.clone(),
                });
            }
        }

        if delivery_address.trim().is_empty() {
            return Err(OrderError::MissingDeliveryInfo {
                field: "delivery address".to_string(),
            });
        }
        let delivery_address =
            validate_delivery_address(delivery_address).map_err(CoreError::from)?;

        if phone.trim().is_empty() {
            return Err(OrderError::MissingDeliveryInfo {
                field: "phone".to_string(),
            });
        }
        let phone = validate_phone(phone).map_err(CoreError::from)?;

        let customer_id = self
            .session
            .customer_id()
            .ok_or(OrderError::NotAuthenticated)?;

        let payload = OrderPayload {
            customer_id,
            delivery_address,
            phone,
            items: store
                .cart()
                .lines()
                .iter()
                .map(|line| OrderItemPayload {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                    variation: line.variation.clone(),
                    special_instructions: line.special_instructions.clone(),
                })
                .collect(),
        };

        let total = store.breakdown().total_paise;
        info!(items = payload.items.len(), total, "submitting order");

        match self.api.create_order(&payload).await {
            Ok(receipt) => {
                // The order exists server-side from here on; a failed
                // document delete must not un-confirm it.
                if let Err(e) = store.clear() {
                    warn!(error = %e, "cart document not removed after confirmed order");
                }

                info!(order_number = %receipt.order_number, "order placed");
                Ok(receipt)
            }
            Err(failure) => {
                warn!(error = %failure, "order submission failed, cart preserved");
                Err(failure.into())
            }
        }
    }
}

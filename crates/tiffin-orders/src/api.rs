//! # External Capability Ports
//!
//! The backend owns the system of record; this module defines the seams the
//! rest of the crate consumes it through. The wire format belongs to the API
//! collaborator — these traits treat request and response shapes as given
//! contracts.
//!
//! Backend failure reasons arrive as free text. They are classified into
//! [`ApiErrorKind`] in exactly one place ([`ApiErrorKind::classify`]); no
//! caller matches on message text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tiffin_core::catalog::CatalogItem;
use tiffin_core::status::OrderStatus;

// =============================================================================
// Request / Response Shapes
// =============================================================================

/// One cart line as submitted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub item_id: String,
    pub quantity: i64,
    pub variation: Option<String>,
    pub special_instructions: Option<String>,
}

/// The validated order submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customer_id: String,
    pub delivery_address: String,
    pub phone: String,
    pub items: Vec<OrderItemPayload>,
}

/// Returned by the backend when an order is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    /// Human-facing order number shown on the confirmation screen.
    pub order_number: String,
}

/// One line of an order as echoed back by the order query capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub variation: Option<String>,
}

/// A customer's order as returned by the order query capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub items: Vec<OrderSummaryItem>,
    pub subtotal_paise: i64,
    pub delivery_fee_paise: i64,
    pub total_paise: i64,
    pub order_date: DateTime<Utc>,
}

// =============================================================================
// Failure Classification
// =============================================================================

/// What kind of failure the backend adapter reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend no longer recognizes one or more submitted items; the
    /// user should refresh their cart.
    ItemsUnavailable,

    /// The backend understood the request and refused it.
    Rejected,

    /// The request never completed: network failure, timeout, 5xx.
    Transport,
}

impl ApiErrorKind {
    /// Classifies a backend refusal reason.
    ///
    /// This is the only place in the workspace that inspects backend
    /// message text. Adapters building an [`ApiFailure`] from an explicit
    /// `{success: false, reason}` response go through here.
    pub fn classify(reason: &str) -> ApiErrorKind {
        let reason = reason.to_ascii_lowercase();

        if reason.contains("no longer available")
            || reason.contains("not available")
            || reason.contains("item not found")
            || reason.contains("does not exist")
        {
            ApiErrorKind::ItemsUnavailable
        } else {
            ApiErrorKind::Rejected
        }
    }
}

/// A failed capability call, already classified by the adapter.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiFailure {
    /// A refusal carried in an explicit backend response.
    pub fn rejected(reason: impl Into<String>) -> Self {
        let message = reason.into();
        ApiFailure {
            kind: ApiErrorKind::classify(&message),
            message,
        }
    }

    /// A network-level failure: nothing is known about the outcome.
    pub fn transport(message: impl Into<String>) -> Self {
        ApiFailure {
            kind: ApiErrorKind::Transport,
            message: message.into(),
        }
    }
}

// =============================================================================
// Capability Ports
// =============================================================================

/// Menu lookup capability.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches a menu item; `Ok(None)` when the id is unknown.
    async fn get_item(&self, item_id: &str) -> Result<Option<CatalogItem>, ApiFailure>;
}

/// Order capability: submission, query, and staff status updates.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Submits a validated order.
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, ApiFailure>;

    /// Returns all orders for a customer, newest first.
    async fn orders_for_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<OrderSummary>, ApiFailure>;

    /// Applies a staff-requested status change to an order.
    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), ApiFailure>;
}

/// Session capability: who is the current customer?
///
/// Token storage and refresh live outside this workspace; all the order
/// pipeline needs is the resolved customer id.
pub trait Session: Send + Sync {
    fn customer_id(&self) -> Option<String>;
}

/// A session with a fixed customer id (or none). Used by tests and by
/// single-user embeddings.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    customer_id: Option<String>,
}

impl StaticSession {
    /// A signed-in session.
    pub fn signed_in(customer_id: impl Into<String>) -> Self {
        StaticSession {
            customer_id: Some(customer_id.into()),
        }
    }

    /// A signed-out session.
    pub fn anonymous() -> Self {
        StaticSession::default()
    }
}

impl Session for StaticSession {
    fn customer_id(&self) -> Option<String> {
        self.customer_id.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

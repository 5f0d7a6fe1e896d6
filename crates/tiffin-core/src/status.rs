//! # Order Status State Machine
//!
//! Legal states and transitions for an order's fulfillment lifecycle.
//!
//! ## Lifecycle Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle                                    │
//! │                                                                         │
//! │  pending ──► confirmed ──► preparing ──► out_for_delivery ──► delivered│
//! │     │            │             │                │                       │
//! │     └────────────┴─────────────┴────────────────┘                       │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                      cancelled                                          │
//! │                                                                         │
//! │  TERMINAL: delivered, cancelled (no transitions out)                    │
//! │  Forward edges are single-step: pending → preparing is illegal.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine holds no persisted state: it is a pure validator plus a
//! display-label mapper. The backend order record is the single source of
//! truth for the applied transition; racing staff sessions are resolved
//! there, and a server rejection is surfaced, never retried silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order. Exactly one value per order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by the customer, awaiting staff confirmation.
    Pending,
    /// Accepted by the kitchen.
    Confirmed,
    /// Being prepared.
    Preparing,
    /// Handed to the rider.
    OutForDelivery,
    /// Received by the customer (terminal).
    Delivered,
    /// Abandoned before delivery (terminal).
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    /// All statuses in lifecycle order; used by staff UIs to render choices.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether no further transition is possible from this status.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next forward step in the fulfillment chain, if any.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether `target` is a legal single transition from this status.
    ///
    /// Legal moves are the immediate forward step, or cancellation from any
    /// non-terminal status. Staying in place is never a transition.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if target == *self {
            return false;
        }

        if target == OrderStatus::Cancelled {
            return !self.is_terminal();
        }

        self.next() == Some(target)
    }

    /// Wire token for this status (`out_for_delivery` style).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label for customer and staff views.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out For Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    /// Parses a wire token. Unknown tokens are rejected rather than mapped
    /// to a default, so a backend contract drift is caught loudly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown status token '{}'", other),
            }
            .into()),
        }
    }
}

// =============================================================================
// Transition Validation
// =============================================================================

/// Validates a requested transition, returning `IllegalTransition` when the
/// move is not an edge of the lifecycle graph.
///
/// Callers run this before the status-update capability is invoked, so an
/// illegal request never leaves the client.
pub fn validate_transition(current: OrderStatus, target: OrderStatus) -> CoreResult<()> {
    if current.can_transition_to(target) {
        Ok(())
    } else {
        Err(CoreError::IllegalTransition {
            from: current,
            to: target,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Order Error Types
//!
//! One typed error enum for the submission pipeline and status updates.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Validation      EmptyCart, InvalidCartLine, MissingDeliveryInfo,      │
//! │                  Core(..)       — caught before any external call      │
//! │                                                                         │
//! │  Authorization   NotAuthenticated — redirect to login, cart preserved  │
//! │                                                                         │
//! │  Conflict        ItemsNoLongerAvailable, Rejected,                     │
//! │                  Core(IllegalTransition) — prompt corrective action    │
//! │                                                                         │
//! │  Transport       Transport      — generic failure, cart preserved,     │
//! │                                   no automatic retry                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI layer translates these into messages; the contract here is only to
//! classify the failure correctly.

use thiserror::Error;
use tiffin_core::CoreError;

use crate::api::{ApiErrorKind, ApiFailure};

/// Errors from order submission and status updates.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The cart has no lines; nothing to submit.
    #[error("cart is empty")]
    EmptyCart,

    /// A persisted cart line carries an id the catalog could never resolve.
    #[error("cart line for item '{item_id}' is invalid; refresh your cart")]
    InvalidCartLine { item_id: String },

    /// Delivery address or phone is missing.
    #[error("{field} is required for delivery")]
    MissingDeliveryInfo { field: String },

    /// No customer id could be resolved from the current session.
    #[error("sign in to place an order")]
    NotAuthenticated,

    /// The backend no longer recognizes one or more cart items.
    #[error("some items are no longer available: {detail}")]
    ItemsNoLongerAvailable { detail: String },

    /// The backend refused the request for a stated reason.
    #[error("request rejected: {reason}")]
    Rejected { reason: String },

    /// The request never completed; the outcome is unknown.
    #[error("could not reach the ordering service: {message}")]
    Transport { message: String },

    /// A domain rule failed (illegal transition, bad field format, ...).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// A classified capability failure becomes the matching order error.
impl From<ApiFailure> for OrderError {
    fn from(failure: ApiFailure) -> Self {
        match failure.kind {
            ApiErrorKind::ItemsUnavailable => OrderError::ItemsNoLongerAvailable {
                detail: failure.message,
            },
            ApiErrorKind::Rejected => OrderError::Rejected {
                reason: failure.message,
            },
            ApiErrorKind::Transport => OrderError::Transport {
                message: failure.message,
            },
        }
    }
}

/// Result type for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

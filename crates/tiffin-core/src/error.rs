//! # Error Types
//!
//! Domain-specific error types for tiffin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiffin-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing, cart and lifecycle rule violations    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiffin-cart errors (separate crate)                                   │
//! │  └── StoreError       - Durable cart document failures                 │
//! │                                                                         │
//! │  tiffin-orders errors (separate crate)                                 │
//! │  └── OrderError       - Submission / status-update / transport         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError / OrderError → UI      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, label, status)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::status::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are caught before
/// any external call and are recoverable by correcting input; the UI layer
/// translates them into human-readable messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item is flagged unavailable; its price must not resolve and it must
    /// not enter the cart.
    #[error("{name} is currently unavailable")]
    ItemUnavailable { name: String },

    /// A multi-variation item was priced without a variation choice.
    #[error("{item} requires a variation choice")]
    VariationRequired { item: String },

    /// The requested variation label is not in the item's price mapping.
    #[error("unknown variation '{label}' for {item}")]
    InvalidVariation { item: String, label: String },

    /// The requested status change is not an edge of the lifecycle graph.
    ///
    /// Raised client-side; an illegal request never reaches the backend.
    #[error("cannot move order from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidVariation {
            item: "Margherita Pizza".to_string(),
            label: "Colossal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown variation 'Colossal' for Margherita Pizza"
        );

        let err = CoreError::IllegalTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "cannot move order from delivered to cancelled");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::TooLong {
            field: "special instructions".to_string(),
            max: 500,
        };
        assert_eq!(
            err.to_string(),
            "special instructions must be at most 500 characters"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

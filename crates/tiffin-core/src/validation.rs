//! # Validation Module
//!
//! Input validation for checkout fields and cart operations.
//!
//! These run before business logic and before any external call, so a bad
//! field is reported to the user instead of travelling to the backend.

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Field Validators
// =============================================================================

/// Validates a delivery address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 500 characters
///
/// ## Returns
/// The trimmed address.
pub fn validate_delivery_address(address: &str) -> ValidationResult<String> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "delivery address".to_string(),
        });
    }

    if address.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "delivery address".to_string(),
            max: 500,
        });
    }

    Ok(address.to_string())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Must not be empty
/// - 7 to 15 digits, with an optional leading `+`; spaces and hyphens are
///   accepted as separators
///
/// ## Returns
/// The trimmed phone string as entered.
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_phone;
///
/// assert!(validate_phone("+91 98765 43210").is_ok());
/// assert!(validate_phone("call me").is_err());
/// assert!(validate_phone("").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let rest = phone.strip_prefix('+').unwrap_or(phone);
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and hyphens".to_string(),
        });
    }

    let digits = rest.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain 7 to 15 digits".to_string(),
        });
    }

    Ok(phone.to_string())
}

/// Validates a special-instructions note.
///
/// ## Rules
/// - Can be empty (no note)
/// - Maximum 500 characters
pub fn validate_instructions(note: &str) -> ValidationResult<()> {
    if note.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "special instructions".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a catalog/order id.
///
/// ## Rules
/// - Must be a valid UUID string
///
/// ## Example
/// ```rust
/// use tiffin_core::validation::validate_id;
///
/// assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_id("not-an-id").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Billing Calculator
//!
//! Turns cart lines into an itemized breakdown.
//!
//! ## Billing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Billing Breakdown                                  │
//! │                                                                         │
//! │  Chicken Biryani (Large)   x1              ₹150.00                     │
//! │  Butter Naan               x2              ₹200.00                     │
//! │  ─────────────────────────────────────────────────                     │
//! │  Subtotal                                  ₹350.00                     │
//! │  Delivery Fee                              ₹50.00                      │
//! │  Service Fee                               ₹0.00                       │
//! │  Tax                                       ₹0.00                       │
//! │  ─────────────────────────────────────────────────                     │
//! │  TOTAL                                     ₹400.00                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The breakdown is derived, never stored: callers recompute on every read so
//! a stale total cannot be displayed. All arithmetic is exact integer paise;
//! rounding exists only in display formatting.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Fee Policy
// =============================================================================

/// Named fee values applied on top of the subtotal.
///
/// These are policy, not formula: the breakdown math never hardcodes an
/// amount, so fee changes don't touch the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeePolicy {
    /// Flat delivery fee per order.
    pub delivery_fee: Money,

    /// Service fee; currently zero, reserved.
    pub service_fee: Money,

    /// Tax; currently zero, reserved.
    pub tax: Money,
}

impl Default for FeePolicy {
    /// Current storefront policy: flat ₹50 delivery, no service fee, no tax.
    fn default() -> Self {
        FeePolicy {
            delivery_fee: Money::from_paise(5000),
            service_fee: Money::zero(),
            tax: Money::zero(),
        }
    }
}

impl FeePolicy {
    /// Creates a FeePolicy from environment overrides and defaults.
    ///
    /// ## Environment Variables
    /// - `TIFFIN_DELIVERY_FEE_PAISE`: override the flat delivery fee
    pub fn from_env() -> Self {
        let mut policy = FeePolicy::default();

        if let Ok(fee) = std::env::var("TIFFIN_DELIVERY_FEE_PAISE") {
            if let Ok(paise) = fee.parse::<i64>() {
                policy.delivery_fee = Money::from_paise(paise);
            }
        }

        policy
    }
}

// =============================================================================
// Billing Breakdown
// =============================================================================

/// The itemized totals derived from cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingBreakdown {
    /// Sum of line totals in paise.
    pub subtotal_paise: i64,

    /// Flat delivery fee in paise.
    pub delivery_fee_paise: i64,

    /// Service fee in paise (currently zero).
    pub service_fee_paise: i64,

    /// Tax in paise (currently zero).
    pub tax_paise: i64,

    /// subtotal + delivery + service + tax.
    pub total_paise: i64,

    /// Number of distinct lines.
    pub item_count: usize,

    /// Sum of quantities across lines.
    pub total_quantity: i64,
}

/// Computes the billing breakdown for a set of cart lines.
///
/// Pure and deterministic: same lines and policy always produce the same
/// breakdown, and the input is never mutated.
///
/// ## Example
/// ```rust
/// use tiffin_core::billing::{compute_breakdown, FeePolicy};
///
/// let breakdown = compute_breakdown(&[], &FeePolicy::default());
/// assert_eq!(breakdown.subtotal_paise, 0);
/// assert_eq!(breakdown.total_paise, 5000); // delivery fee still applies
/// ```
pub fn compute_breakdown(lines: &[CartLine], policy: &FeePolicy) -> BillingBreakdown {
    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
    let total = subtotal + policy.delivery_fee + policy.service_fee + policy.tax;

    BillingBreakdown {
        subtotal_paise: subtotal.paise(),
        delivery_fee_paise: policy.delivery_fee.paise(),
        service_fee_paise: policy.service_fee.paise(),
        tax_paise: policy.tax.paise(),
        total_paise: total.paise(),
        item_count: lines.len(),
        total_quantity: lines.iter().map(|l| l.quantity).sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

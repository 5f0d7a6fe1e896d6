//! # Cart Types
//!
//! The cart value type and its invariants.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Invariants                                  │
//! │                                                                         │
//! │  1. UNIQUENESS  at most one line per (item_id, variation) pair.        │
//! │     Adding a matching item merges into the existing line.              │
//! │                                                                         │
//! │  2. QUANTITY FLOOR  every present line has quantity >= 1.              │
//! │     Setting a quantity to zero removes the line instead.               │
//! │                                                                         │
//! │  3. PRICE SNAPSHOT  unit_price_paise is frozen at insertion time.      │
//! │     A menu price change mid-session never silently reprices an        │
//! │     existing line.                                                      │
//! │                                                                         │
//! │  Persistence recovery re-checks 1 and 2 via `Cart::from_lines`; any    │
//! │  violation marks the stored document as corrupt.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are held private and mutated only through methods, so the
//! invariants hold for every reachable cart state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogItem;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct purchasable selection in the cart.
///
/// `name` and `image_url` are denormalized from the catalog at insertion
/// time so the cart renders without a live menu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog item id (UUID string).
    pub item_id: String,

    /// Variation label; present only for multi-variation items.
    pub variation: Option<String>,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Quantity in cart; always >= 1.
    pub quantity: i64,

    /// Optional free-text kitchen note ("less spicy", "no onions").
    pub special_instructions: Option<String>,

    /// Image reference at time of adding (frozen).
    pub image_url: Option<String>,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Whether this line is identified by the given `(item_id, variation)`.
    pub fn matches(&self, item_id: &str, variation: Option<&str>) -> bool {
        self.item_id == item_id && self.variation.as_deref() == variation
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The customer's cart: an ordered sequence of lines.
///
/// Insertion order is irrelevant to totals but preserved for display. The
/// durable representation is the bare line array, so the type itself stays
/// out of the storage format.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from persisted lines, re-checking every invariant.
    ///
    /// Used when loading the durable cart document: a quantity below 1, a
    /// blank item id, or a duplicate `(item_id, variation)` pair means the
    /// document was tampered with or corrupted, and the caller resets to an
    /// empty cart.
    pub fn from_lines(lines: Vec<CartLine>) -> CoreResult<Self> {
        if lines.len() > MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        for (i, line) in lines.iter().enumerate() {
            if line.item_id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "itemId".to_string(),
                }
                .into());
            }

            if line.quantity < 1 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }
                .into());
            }

            if line.quantity > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: line.quantity,
                    max: MAX_LINE_QUANTITY,
                });
            }

            let duplicate = lines[..i]
                .iter()
                .any(|other| other.matches(&line.item_id, line.variation.as_deref()));
            if duplicate {
                return Err(ValidationError::InvalidFormat {
                    field: "cart".to_string(),
                    reason: format!("duplicate line for item {}", line.item_id),
                }
                .into());
            }
        }

        Ok(Cart { lines })
    }

    /// Adds a catalog item to the cart, or merges into an existing line.
    ///
    /// ## Behavior
    /// - Resolves and freezes the unit price via the pricing rules
    ///   (unavailable items and bad variation labels are rejected here,
    ///   leaving the cart unchanged).
    /// - If a line with the same `(item_id, variation)` exists: quantity is
    ///   incremented and the kitchen note is replaced only when a non-empty
    ///   one was supplied.
    /// - Otherwise a new line is appended.
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
        variation: Option<&str>,
        special_instructions: Option<String>,
    ) -> CoreResult<()> {
        if quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        // Price resolution first: it carries the availability gate, and a
        // rejected add must leave the cart untouched.
        let unit_price = item.resolve_price(variation)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&item.id, variation))
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            if let Some(note) = special_instructions.filter(|s| !s.trim().is_empty()) {
                line.special_instructions = Some(note);
            }
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            variation: variation.map(str::to_string),
            name: item.name.clone(),
            unit_price_paise: unit_price.paise(),
            quantity,
            special_instructions: special_instructions.filter(|s| !s.trim().is_empty()),
            image_url: item.image_url.clone(),
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets the quantity of a line; zero or below removes it.
    ///
    /// A line that isn't present is left alone.
    pub fn update_quantity(
        &mut self,
        item_id: &str,
        variation: Option<&str>,
        quantity: i64,
    ) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_line(item_id, variation);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(item_id, variation)) {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Removes the matching line. Returns whether anything was removed.
    pub fn remove_line(&mut self, item_id: &str, variation: Option<&str>) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| !l.matches(item_id, variation));
        self.lines.len() != initial_len
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Pricing;

    fn test_item(id: &str, paise: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            available: true,
            pricing: Pricing::single(paise),
            image_url: None,
        }
    }

    fn variation_item(id: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            available: true,
            pricing: Pricing::variations([("Regular", 10000), ("Large", 15000)]),
            image_url: None,
        }
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 2, None, None).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.lines()[0].line_total().paise(), 19800);
    }

    #[test]
    fn test_add_same_item_merges_line() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 2, None, None).unwrap();
        cart.add_item(&item, 3, None, None).unwrap();

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_same_item_different_variations_are_distinct_lines() {
        let mut cart = Cart::new();
        let item = variation_item("1");

        cart.add_item(&item, 1, Some("Regular"), None).unwrap();
        cart.add_item(&item, 1, Some("Large"), None).unwrap();
        cart.add_item(&item, 2, Some("Large"), None).unwrap();

        assert_eq!(cart.line_count(), 2);
        let large = cart
            .lines()
            .iter()
            .find(|l| l.matches("1", Some("Large")))
            .unwrap();
        assert_eq!(large.quantity, 3);
        assert_eq!(large.unit_price_paise, 15000);
    }

    #[test]
    fn test_merge_replaces_note_only_when_non_empty() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 1, None, Some("less spicy".to_string()))
            .unwrap();
        cart.add_item(&item, 1, None, None).unwrap();
        assert_eq!(
            cart.lines()[0].special_instructions.as_deref(),
            Some("less spicy")
        );

        cart.add_item(&item, 1, None, Some("  ".to_string())).unwrap();
        assert_eq!(
            cart.lines()[0].special_instructions.as_deref(),
            Some("less spicy")
        );

        cart.add_item(&item, 1, None, Some("extra raita".to_string()))
            .unwrap();
        assert_eq!(
            cart.lines()[0].special_instructions.as_deref(),
            Some("extra raita")
        );
    }

    #[test]
    fn test_price_snapshot_survives_menu_change() {
        let mut cart = Cart::new();
        let mut item = test_item("1", 10000);

        cart.add_item(&item, 1, None, None).unwrap();

        // Menu price changes mid-session; the existing line keeps ₹100.
        item.pricing = Pricing::single(15000);
        assert_eq!(cart.lines()[0].unit_price_paise, 10000);
    }

    #[test]
    fn test_unavailable_item_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let mut item = test_item("1", 9900);
        item.available = false;

        let err = cart.add_item(&item, 1, None, None).unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_add_rejected() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        assert!(cart.add_item(&item, 0, None, None).is_err());
        assert!(cart.add_item(&item, -3, None, None).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 2, None, None).unwrap();
        cart.update_quantity("1", None, 0).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 2, None, None).unwrap();
        cart.update_quantity("1", None, 7).unwrap();

        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);
        cart.add_item(&item, 1, None, None).unwrap();

        assert!(!cart.remove_line("2", None));
        assert!(!cart.remove_line("1", Some("Large")));
        assert_eq!(cart.line_count(), 1);

        assert!(cart.remove_line("1", None));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_floor_holds_everywhere() {
        let mut cart = Cart::new();
        let item = test_item("1", 9900);

        cart.add_item(&item, 1, None, None).unwrap();
        cart.update_quantity("1", None, -5).unwrap();
        cart.add_item(&item, 2, None, None).unwrap();

        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_from_lines_accepts_valid_state() {
        let mut cart = Cart::new();
        cart.add_item(&test_item("1", 9900), 2, None, None).unwrap();
        cart.add_item(&variation_item("2"), 1, Some("Large"), None)
            .unwrap();

        let rebuilt = Cart::from_lines(cart.lines().to_vec()).unwrap();
        assert_eq!(rebuilt.line_count(), 2);
        assert_eq!(rebuilt.total_quantity(), 3);
    }

    #[test]
    fn test_from_lines_rejects_duplicates_and_bad_quantities() {
        let mut cart = Cart::new();
        cart.add_item(&test_item("1", 9900), 2, None, None).unwrap();
        let mut lines = cart.lines().to_vec();

        let mut dup = lines[0].clone();
        dup.quantity = 1;
        lines.push(dup);
        assert!(Cart::from_lines(lines.clone()).is_err());

        lines.pop();
        lines[0].quantity = 0;
        assert!(Cart::from_lines(lines.clone()).is_err());

        lines[0].quantity = 1;
        lines[0].item_id = "  ".to_string();
        assert!(Cart::from_lines(lines).is_err());
    }
}

//! # Catalog Types & Pricing Engine
//!
//! Read-only view of the menu as served by the catalog capability, plus the
//! price resolution rules.
//!
//! ## Pricing Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Price Resolution                                   │
//! │                                                                         │
//! │  CatalogItem.pricing                                                    │
//! │  ├── Single(₹120)            resolve_price(_)        → ₹120            │
//! │  │                           (variation ignored)                        │
//! │  │                                                                      │
//! │  └── Variations {            resolve_price("Large")  → ₹150            │
//! │        "Regular": ₹100,      resolve_price("Jumbo")  → InvalidVariation│
//! │        "Large":   ₹150,      resolve_price(None)     → VariationReq.   │
//! │      }                                                                  │
//! │                                                                         │
//! │  available == false          resolve_price(..)       → ItemUnavailable │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two pricing shapes are a tagged enum, not a struct with optional
//! fields: resolution must match both tags exhaustively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Pricing
// =============================================================================

/// How a catalog item is priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "mode", content = "prices")]
pub enum Pricing {
    /// One scalar price for the item.
    Single(Money),

    /// A named variation (e.g. "Half", "Full", "Large") per price.
    /// BTreeMap keeps serialization order stable for the frontend.
    Variations(BTreeMap<String, Money>),
}

impl Pricing {
    /// Builds a single-price mode from paise.
    pub fn single(paise: i64) -> Self {
        Pricing::Single(Money::from_paise(paise))
    }

    /// Builds a multi-variation mode from `(label, paise)` pairs.
    pub fn variations<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Pricing::Variations(
            pairs
                .into_iter()
                .map(|(label, paise)| (label.into(), Money::from_paise(paise)))
                .collect(),
        )
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A menu item as returned by the catalog capability.
///
/// Read-only to this workspace: the menu CRUD surface lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique identifier (UUID string).
    pub id: String,

    /// Display name shown on menu and receipts.
    pub name: String,

    /// Whether the item can currently be ordered.
    pub available: bool,

    /// Pricing mode: single price or variation map.
    pub pricing: Pricing,

    /// Optional image reference for offline rendering.
    pub image_url: Option<String>,
}

impl CatalogItem {
    /// Resolves the unit price for this item and an optional variation.
    ///
    /// ## Rules
    /// - Unavailable items never price; this is also what keeps them out of
    ///   the cart.
    /// - `Single` pricing ignores any supplied variation label.
    /// - `Variations` pricing requires a label that exists in the mapping.
    ///
    /// Pure: no side effects, no I/O.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::catalog::{CatalogItem, Pricing};
    ///
    /// let item = CatalogItem {
    ///     id: "3f2c44ad-5c34-4a55-9c1c-0e5bd65c21da".to_string(),
    ///     name: "Paneer Tikka".to_string(),
    ///     available: true,
    ///     pricing: Pricing::variations([("Half", 12000), ("Full", 22000)]),
    ///     image_url: None,
    /// };
    ///
    /// assert_eq!(item.resolve_price(Some("Half")).unwrap().paise(), 12000);
    /// assert!(item.resolve_price(Some("Quarter")).is_err());
    /// ```
    pub fn resolve_price(&self, variation: Option<&str>) -> CoreResult<Money> {
        if !self.available {
            return Err(CoreError::ItemUnavailable {
                name: self.name.clone(),
            });
        }

        match &self.pricing {
            Pricing::Single(price) => Ok(*price),
            Pricing::Variations(prices) => {
                let label = variation.ok_or_else(|| CoreError::VariationRequired {
                    item: self.name.clone(),
                })?;

                prices
                    .get(label)
                    .copied()
                    .ok_or_else(|| CoreError::InvalidVariation {
                        item: self.name.clone(),
                        label: label.to_string(),
                    })
            }
        }
    }

    /// Whether this item is priced per variation.
    pub fn has_variations(&self) -> bool {
        matches!(self.pricing, Pricing::Variations(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

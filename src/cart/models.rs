//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StoreError;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart items
fn default_quantity() -> u32 {
    1
}

/// The product data captured when an item enters the cart.
///
/// Prices are snapshots of the catalog at add time; the engine does not
/// re-price on catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Catalog identifier; unique key within the cart
    pub id: String,

    /// Display name of the product
    pub name: String,

    /// Current unit price, non-negative
    pub price: f64,

    /// Pre-discount unit price, when the product is on sale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    /// Chosen variant per axis (e.g. "Size" -> "M"); order irrelevant
    #[serde(default)]
    pub selected_variants: HashMap<String, String>,

    #[serde(default)]
    pub image_url: String,
}

impl ProductSnapshot {
    /// Checks the snapshot is usable as a cart entry.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidProduct("empty product id".into()));
        }
        if self.price.is_nan() || self.price < 0.0 {
            return Err(StoreError::InvalidProduct(format!(
                "invalid price for {}",
                self.id
            )));
        }
        if let Some(original) = self.original_price {
            if original.is_nan() || original < self.price {
                return Err(StoreError::InvalidProduct(format!(
                    "original price below current price for {}",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// A cart entry: one product and its quantity.
///
/// Exactly one line item exists per product id at any time; re-adding an
/// existing product merges quantities instead of duplicating the entry. The
/// same shape backs the saved-for-later list, where the quantity is carried
/// along unchanged so a move round-trip restores the cart line exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub quantity: u32,
    #[serde(default)]
    pub selected_variants: HashMap<String, String>,
    #[serde(default)]
    pub image_url: String,
}

impl CartLineItem {
    pub fn from_snapshot(product: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            price: product.price,
            original_price: product.original_price,
            quantity,
            selected_variants: product.selected_variants,
            image_url: product.image_url,
        }
    }

    /// Line total before any cart-level discount.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Request / Response Payloads
// =============================================================================

/// Input for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product: ProductSnapshot,

    /// How many units to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Optional session identifier
    pub session_id: Option<String>,
}

/// Input for setting a line item's quantity directly
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityInput {
    pub product_id: String,

    /// New absolute quantity; below 1 this removes the line
    pub quantity: u32,

    pub session_id: Option<String>,
}

/// Input referencing a single line item (remove, save, unsave)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRefInput {
    pub product_id: String,
    pub session_id: Option<String>,
}

/// Input carrying only a session reference (clear, view)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Input for applying a coupon code
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    pub session_id: Option<String>,
}

/// Response for mutation operations
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    /// Status of the operation
    pub status: String,

    /// Session identifier
    pub session_id: String,
}

/// Full cart view for rendering: collections plus the derived summary
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub session_id: String,

    /// Active cart lines, in insertion order
    pub items: Vec<CartLineItem>,

    /// Saved-for-later lines, in insertion order
    pub saved_for_later: Vec<CartLineItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<crate::cart::summary::AppliedCoupon>,

    /// Monetary fields rounded to 2 decimals for display
    pub summary: crate::cart::summary::OrderSummary,
}

//! Wishlist Domain Models

use serde::{Deserialize, Serialize};

/// A liked product: full catalog snapshot, unique by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Input for adding a product to the wishlist
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistInput {
    pub product: WishlistItem,
    pub session_id: Option<String>,
}

/// Input referencing a wishlist entry by id
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRefInput {
    pub id: String,
    pub session_id: Option<String>,
}

/// Wishlist view for rendering
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub session_id: String,

    /// Entries in insertion order
    pub items: Vec<WishlistItem>,

    pub count: usize,
}

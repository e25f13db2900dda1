//! Order-summary computation and coupon validation.
//!
//! The summary is a pure function of the current cart lines and the applied
//! coupon; it is recomputed on every read and never cached, so it cannot go
//! stale relative to cart mutations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::CartLineItem;
use crate::helpers::round_currency;

// =============================================================================
// Pricing Policy
// =============================================================================

/// Storefront pricing constants.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    /// Subtotal at or above this ships free
    pub free_shipping_threshold: f64,

    /// Flat shipping fee below the threshold
    pub flat_shipping_fee: f64,

    /// Tax rate applied to the subtotal only (not shipping, not net of
    /// discount)
    pub tax_rate: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 50.0,
            flat_shipping_fee: 9.99,
            tax_rate: 0.08,
        }
    }
}

// =============================================================================
// Coupons
// =============================================================================

/// A session-scoped discount currently applied to the cart.
///
/// At most one coupon is applied at a time; applying a new one replaces any
/// existing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedCoupon {
    /// Normalized (uppercase) coupon code
    pub code: String,

    /// Fractional discount on the subtotal, e.g. 0.10
    pub rate: f64,
}

/// Capability the cart consumes to turn a coupon code into a discount rate.
///
/// Codes arrive already normalized to uppercase.
pub trait CouponValidator: Send + Sync {
    fn rate_for(&self, code: &str) -> Option<f64>;
}

/// A fixed code -> rate book.
#[derive(Debug, Default)]
pub struct CouponBook {
    rates: HashMap<String, f64>,
}

impl CouponBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a code; stored uppercase so lookups are case-insensitive.
    pub fn with_code(mut self, code: &str, rate: f64) -> Self {
        self.rates.insert(code.to_uppercase(), rate);
        self
    }
}

impl CouponValidator for CouponBook {
    fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Derived monetary totals for the current cart. Never stored; always
/// recomputed from cart state on read.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: f64,
    pub shipping_fee: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub grand_total: f64,

    /// Sum of quantities across all cart lines
    pub item_count: u32,
}

impl OrderSummary {
    /// Presentation copy with monetary fields rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_currency(self.subtotal),
            shipping_fee: round_currency(self.shipping_fee),
            tax_amount: round_currency(self.tax_amount),
            discount_amount: round_currency(self.discount_amount),
            grand_total: round_currency(self.grand_total),
            item_count: self.item_count,
        }
    }
}

/// Computes the order summary for the given cart lines and coupon.
///
/// An empty cart yields an all-zero summary; the flat shipping fee only
/// applies once there is something to ship.
pub fn summarize(
    items: &[CartLineItem],
    coupon: Option<&AppliedCoupon>,
    policy: &PricingPolicy,
) -> OrderSummary {
    let subtotal: f64 = items.iter().map(CartLineItem::line_total).sum();
    let item_count: u32 = items.iter().map(|i| i.quantity).sum();

    let shipping_fee = if items.is_empty() || subtotal >= policy.free_shipping_threshold {
        0.0
    } else {
        policy.flat_shipping_fee
    };

    let tax_amount = subtotal * policy.tax_rate;
    let discount_amount = coupon.map_or(0.0, |c| subtotal * c.rate);

    OrderSummary {
        subtotal,
        shipping_fee,
        tax_amount,
        discount_amount,
        grand_total: subtotal + shipping_fee + tax_amount - discount_amount,
        item_count,
    }
}

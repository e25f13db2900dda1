//! Cart State Management
//!
//! `CartState` is the single source of truth for one session's cart and
//! saved-for-later collections. Both collections are private; all mutation
//! goes through the operation surface, and each operation completes atomically
//! before the next observable state is produced.
//!
//! `AppState` is the session registry handed to the HTTP layer: it maps a
//! session id to that session's cart and wishlist states.

use dashmap::DashMap;
use std::sync::Arc;

use super::models::{CartLineItem, ProductSnapshot};
use super::summary::{
    summarize, AppliedCoupon, CouponBook, CouponValidator, OrderSummary, PricingPolicy,
};
use crate::error::StoreError;
use crate::wishlist::state::WishlistState;

// =============================================================================
// Cart Engine
// =============================================================================

/// One session's cart: active lines, saved-for-later lines, applied coupon.
///
/// Invariants maintained by every operation:
/// - at most one line per product id in each collection;
/// - a product id is never in the cart and saved-for-later simultaneously;
/// - quantities are always >= 1;
/// - enumeration order is insertion order.
#[derive(Debug, Default)]
pub struct CartState {
    items: Vec<CartLineItem>,
    saved: Vec<CartLineItem>,
    coupon: Option<AppliedCoupon>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active cart lines, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Saved-for-later lines, in insertion order.
    pub fn saved_items(&self) -> &[CartLineItem] {
        &self.saved
    }

    pub fn coupon(&self) -> Option<&AppliedCoupon> {
        self.coupon.as_ref()
    }

    /// Adds `quantity` units of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line is appended. A saved-for-later line with the same
    /// id is absorbed into the cart line, so the id stays in exactly one
    /// collection. The snapshot is validated first, so a rejected add leaves
    /// both collections untouched.
    pub fn add_to_cart(
        &mut self,
        product: ProductSnapshot,
        quantity: u32,
    ) -> Result<(), StoreError> {
        if quantity < 1 {
            return Err(StoreError::InvalidQuantity);
        }
        product.validate()?;

        let absorbed = self
            .saved
            .iter()
            .position(|i| i.product_id == product.id)
            .map(|pos| self.saved.remove(pos).quantity)
            .unwrap_or(0);

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity += quantity + absorbed;
        } else {
            self.items
                .push(CartLineItem::from_snapshot(product, quantity + absorbed));
        }
        Ok(())
    }

    /// Sets a line's quantity to an absolute value (not a delta).
    ///
    /// A quantity below 1 removes the line; an absent product id is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity < 1 {
            self.remove_from_cart(product_id);
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = quantity;
        }
    }

    /// Removes a line from the cart. Idempotent: absent ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empties the cart. Saved-for-later is unaffected.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Moves a cart line to saved-for-later, carrying its quantity along.
    ///
    /// Absent ids are a no-op. Should a line for the product already sit in
    /// saved-for-later, quantities are merged so the exclusivity invariant
    /// holds under any operation sequence.
    pub fn move_to_saved(&mut self, product_id: &str) {
        let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) else {
            return;
        };
        let line = self.items.remove(pos);

        if let Some(existing) = self.saved.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity += line.quantity;
        } else {
            self.saved.push(line);
        }
    }

    /// Moves a saved-for-later line back into the cart.
    ///
    /// Quantities merge with any existing cart line, the same rule as
    /// `add_to_cart`. Absent ids are a no-op.
    pub fn move_to_cart(&mut self, product_id: &str) {
        let Some(pos) = self.saved.iter().position(|i| i.product_id == product_id) else {
            return;
        };
        let line = self.saved.remove(pos);

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity += line.quantity;
        } else {
            self.items.push(line);
        }
    }

    /// Removes a saved-for-later line outright. Idempotent.
    pub fn remove_saved(&mut self, product_id: &str) {
        self.saved.retain(|i| i.product_id != product_id);
    }

    /// Subtotal over active cart lines.
    pub fn cart_total(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities across active cart lines.
    pub fn cart_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Applies a coupon code, replacing any coupon already in effect.
    ///
    /// The code is normalized to uppercase before the validator sees it. An
    /// unrecognized code leaves the current coupon (and everything else)
    /// unchanged.
    pub fn apply_coupon(
        &mut self,
        code: &str,
        validator: &dyn CouponValidator,
    ) -> Result<AppliedCoupon, StoreError> {
        let normalized = code.trim().to_uppercase();
        let rate = validator
            .rate_for(&normalized)
            .ok_or_else(|| StoreError::InvalidCoupon(normalized.clone()))?;

        let coupon = AppliedCoupon {
            code: normalized,
            rate,
        };
        self.coupon = Some(coupon.clone());
        Ok(coupon)
    }

    /// Clears any applied coupon. Always succeeds.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Derived totals for the current cart and coupon state.
    pub fn summary(&self, policy: &PricingPolicy) -> OrderSummary {
        summarize(&self.items, self.coupon.as_ref(), policy)
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Session registry: per-session cart and wishlist state, pricing policy,
/// and the coupon validator the carts consume.
pub struct AppState {
    /// Per-session cart engines, keyed by session id.
    /// DashMap entry guards keep each store operation atomic per session.
    carts: DashMap<String, CartState>,

    /// Per-session wishlists, keyed by session id. Independent of the carts.
    wishlists: DashMap<String, WishlistState>,

    pricing: PricingPolicy,

    coupons: Box<dyn CouponValidator>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an AppState with default pricing and the storefront's standard
    /// coupon book.
    pub fn new() -> Self {
        let coupons = CouponBook::new()
            .with_code("SAVE10", 0.10)
            .with_code("WELCOME15", 0.15);
        Self::with_policy(PricingPolicy::default(), Box::new(coupons))
    }

    pub fn with_policy(pricing: PricingPolicy, coupons: Box<dyn CouponValidator>) -> Self {
        Self {
            carts: DashMap::new(),
            wishlists: DashMap::new(),
            pricing,
            coupons,
        }
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn coupons(&self) -> &dyn CouponValidator {
        self.coupons.as_ref()
    }

    /// Runs `op` against the session's cart, creating the cart on first use.
    ///
    /// The entry guard is held for the duration of `op`, so no partial
    /// mutation is observable from another request on the same session.
    pub fn with_cart<T>(&self, session_id: &str, op: impl FnOnce(&mut CartState) -> T) -> T {
        let mut entry = self.carts.entry(session_id.to_string()).or_default();
        op(&mut entry)
    }

    /// Runs `op` against the session's wishlist, creating it on first use.
    pub fn with_wishlist<T>(
        &self,
        session_id: &str,
        op: impl FnOnce(&mut WishlistState) -> T,
    ) -> T {
        let mut entry = self.wishlists.entry(session_id.to_string()).or_default();
        op(&mut entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn snapshot(id: &str, price: f64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.into(),
            name: format!("Product {id}"),
            price,
            original_price: None,
            selected_variants: HashMap::new(),
            image_url: String::new(),
        }
    }

    #[test]
    fn readd_merges_into_one_line() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.add_to_cart(snapshot("p1", 10.0), 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn add_rejects_bad_input_without_mutating() {
        let mut cart = CartState::new();
        assert_eq!(
            cart.add_to_cart(snapshot("p1", 10.0), 0),
            Err(StoreError::InvalidQuantity)
        );
        assert!(matches!(
            cart.add_to_cart(snapshot("", 10.0), 1),
            Err(StoreError::InvalidProduct(_))
        ));
        assert!(matches!(
            cart.add_to_cart(snapshot("p2", -1.0), 1),
            Err(StoreError::InvalidProduct(_))
        ));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn add_rejects_nan_prices() {
        let mut cart = CartState::new();
        assert!(matches!(
            cart.add_to_cart(snapshot("p1", f64::NAN), 1),
            Err(StoreError::InvalidProduct(_))
        ));

        let mut product = snapshot("p2", 10.0);
        product.original_price = Some(f64::NAN);
        assert!(matches!(
            cart.add_to_cart(product, 1),
            Err(StoreError::InvalidProduct(_))
        ));

        assert!(cart.items().is_empty());
    }

    #[test]
    fn add_rejects_original_price_below_price() {
        let mut cart = CartState::new();
        let mut product = snapshot("p1", 30.0);
        product.original_price = Some(20.0);
        assert!(cart.add_to_cart(product, 1).is_err());
    }

    #[test]
    fn update_quantity_sets_absolute_value() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.update_quantity("p1", 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn update_quantity_zero_removes_line() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.update_quantity("p1", 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn update_quantity_absent_id_is_noop() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.update_quantity("ghost", 4);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 1).unwrap();
        let before = cart.items().to_vec();

        cart.remove_from_cart("ghost");
        assert_eq!(cart.items(), before.as_slice());

        cart.remove_from_cart("p1");
        cart.remove_from_cart("p1");
        assert!(cart.items().is_empty());
    }

    #[test]
    fn clear_cart_leaves_saved_alone() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 1).unwrap();
        cart.add_to_cart(snapshot("p2", 5.0), 1).unwrap();
        cart.move_to_saved("p2");

        cart.clear_cart();
        assert!(cart.items().is_empty());
        assert_eq!(cart.saved_items().len(), 1);
    }

    #[test]
    fn move_round_trip_restores_line() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 12.5), 3).unwrap();
        let original = cart.items()[0].clone();

        cart.move_to_saved("p1");
        assert!(cart.items().is_empty());
        assert_eq!(cart.saved_items().len(), 1);

        cart.move_to_cart("p1");
        assert!(cart.saved_items().is_empty());
        assert_eq!(cart.items()[0], original);
    }

    fn occurrences(cart: &CartState, product_id: &str) -> (usize, usize) {
        let in_cart = cart
            .items()
            .iter()
            .filter(|i| i.product_id == product_id)
            .count();
        let in_saved = cart
            .saved_items()
            .iter()
            .filter(|i| i.product_id == product_id)
            .count();
        (in_cart, in_saved)
    }

    #[test]
    fn readd_while_saved_absorbs_saved_line() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.move_to_saved("p1");

        cart.add_to_cart(snapshot("p1", 10.0), 1).unwrap();

        assert_eq!(occurrences(&cart, "p1"), (1, 0));
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn exclusivity_holds_across_operations() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.move_to_saved("p1");
        assert_eq!(occurrences(&cart, "p1"), (0, 1));

        // re-adding while saved absorbs the saved line immediately
        cart.add_to_cart(snapshot("p1", 10.0), 1).unwrap();
        assert_eq!(occurrences(&cart, "p1"), (1, 0));
        assert_eq!(cart.items()[0].quantity, 3);

        // the move back is now a no-op; still exactly one line
        cart.move_to_cart("p1");
        assert_eq!(occurrences(&cart, "p1"), (1, 0));
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn move_absent_ids_are_noops() {
        let mut cart = CartState::new();
        cart.move_to_saved("ghost");
        cart.move_to_cart("ghost");
        cart.remove_saved("ghost");
        assert!(cart.items().is_empty());
        assert!(cart.saved_items().is_empty());
    }

    #[test]
    fn totals_and_count() {
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 10.0), 2).unwrap();
        cart.add_to_cart(snapshot("p2", 5.0), 1).unwrap();
        assert_eq!(cart.cart_total(), 25.0);
        assert_eq!(cart.cart_count(), 3);
    }

    #[test]
    fn coupon_apply_replace_remove() {
        let book = CouponBook::new()
            .with_code("SAVE10", 0.10)
            .with_code("WELCOME15", 0.15);
        let mut cart = CartState::new();
        cart.add_to_cart(snapshot("p1", 100.0), 1).unwrap();

        // case-insensitive apply
        let applied = cart.apply_coupon("save10", &book).unwrap();
        assert_eq!(applied.code, "SAVE10");

        // replacement, no stacking
        cart.apply_coupon("WELCOME15", &book).unwrap();
        let summary = cart.summary(&PricingPolicy::default());
        assert!((summary.discount_amount - 15.0).abs() < 1e-9);

        // rejection leaves the applied coupon in place
        assert_eq!(
            cart.apply_coupon("BOGUS", &book),
            Err(StoreError::InvalidCoupon("BOGUS".into()))
        );
        assert_eq!(cart.coupon().unwrap().code, "WELCOME15");

        cart.remove_coupon();
        assert!(cart.coupon().is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = CartState::new();
        for id in ["b", "a", "c"] {
            cart.add_to_cart(snapshot(id, 1.0), 1).unwrap();
        }
        let order: Vec<_> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn sessions_are_isolated() {
        let state = AppState::new();
        state.with_cart("s1", |cart| {
            cart.add_to_cart(snapshot("p1", 10.0), 1).unwrap();
        });
        let other_count = state.with_cart("s2", |cart| cart.cart_count());
        assert_eq!(other_count, 0);
    }
}

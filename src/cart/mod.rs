//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (line items, product snapshots, inputs, responses)
//! - The cart state engine (cart + saved-for-later collections)
//! - Order-summary computation and coupon validation
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod state;
pub mod summary;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, CartState, SharedState};
pub use summary::{AppliedCoupon, CouponBook, CouponValidator, OrderSummary, PricingPolicy};

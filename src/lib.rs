//! Storefront State Library
//!
//! This library provides the core state engine for a storefront front-end:
//! the shopping cart (with saved-for-later and coupon handling), the wishlist,
//! and the derived order-summary computation, plus a thin REST surface for
//! presentation components.

// Domain modules
pub mod cart;
pub mod wishlist;

// Infrastructure
pub mod error;
pub mod helpers;
pub mod router;

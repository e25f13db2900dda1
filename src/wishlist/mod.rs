//! Wishlist Domain Module
//!
//! The wishlist is a flat set of liked products, independent of cart
//! membership: a product may sit in both the wishlist and the cart at once.

pub mod handlers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::WishlistState;

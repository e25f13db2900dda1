//! Helper utilities shared across the cart and wishlist surfaces.

use uuid::Uuid;

/// Returns the provided `session_id` or creates a new UUID string when `None`.
///
/// This guarantees that every store operation works with a non-empty
/// identifier; the handlers echo it back so the client can pin its session.
pub fn get_or_create_session_id(session_id: Option<String>) -> String {
    session_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Rounds a monetary amount to 2 decimal places.
///
/// Used only at the presentation boundary; internal totals math stays
/// unrounded so repeated additions do not compound rounding error.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

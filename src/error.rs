//! Error taxonomy for the store engine.
//!
//! Every error here is locally recoverable: the presentation layer reports it
//! and the stores remain in their previous, consistent state. Removal or
//! update of an id that is not present is deliberately *not* an error — those
//! operations are idempotent no-ops so stale UI references (double-clicked
//! remove buttons) never crash an interaction.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Malformed product reference on add: empty id, negative price, or an
    /// original price below the current price.
    #[error("invalid product reference: {0}")]
    InvalidProduct(String),

    /// Non-positive quantity on add.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Unrecognized coupon code. Cart state is left untouched.
    #[error("unknown coupon code: {0}")]
    InvalidCoupon(String),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

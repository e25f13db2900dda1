//! REST API handlers for shopping cart operations
//!
//! This module implements the HTTP surface the presentation layer drives:
//! cart mutations, saved-for-later moves, coupon application, and the full
//! cart view used for rendering.

use super::models::*;
use super::state::SharedState;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use tracing::info;

use crate::error::StoreError;
use crate::helpers::get_or_create_session_id;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/items", post(add_item))
        .route("/cart/quantity", post(update_quantity))
        .route("/cart/remove", post(remove_item))
        .route("/cart/clear", post(clear_cart))
        .route("/cart/save", post(save_for_later))
        .route("/cart/unsave", post(move_back_to_cart))
        .route("/cart/saved/remove", post(remove_saved))
        .route("/cart/coupon", post(apply_coupon))
        .route("/cart/coupon/remove", post(remove_coupon))
        .route("/cart/view", post(view_cart))
}

fn updated(session_id: String) -> Json<SyncResponse> {
    Json(SyncResponse {
        status: "updated".to_string(),
        session_id,
    })
}

/// Endpoint: POST /cart/items
/// Adds a product to the session's cart, merging quantities on re-add.
async fn add_item(
    State(state): State<SharedState>,
    Json(payload): Json<AddItemInput>,
) -> Result<impl IntoResponse, StoreError> {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| {
        cart.add_to_cart(payload.product, payload.quantity)
    })?;

    Ok(updated(session_id))
}

/// Endpoint: POST /cart/quantity
/// Sets a line's quantity; 0 removes the line.
async fn update_quantity(
    State(state): State<SharedState>,
    Json(payload): Json<QuantityInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| {
        cart.update_quantity(&payload.product_id, payload.quantity)
    });

    updated(session_id)
}

/// Endpoint: POST /cart/remove
async fn remove_item(
    State(state): State<SharedState>,
    Json(payload): Json<ItemRefInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| {
        cart.remove_from_cart(&payload.product_id)
    });

    updated(session_id)
}

/// Endpoint: POST /cart/clear
async fn clear_cart(
    State(state): State<SharedState>,
    Json(payload): Json<SessionInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| cart.clear_cart());
    info!(session = %session_id, "cart cleared");

    updated(session_id)
}

/// Endpoint: POST /cart/save
/// Moves a cart line into saved-for-later.
async fn save_for_later(
    State(state): State<SharedState>,
    Json(payload): Json<ItemRefInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| {
        cart.move_to_saved(&payload.product_id)
    });

    updated(session_id)
}

/// Endpoint: POST /cart/unsave
/// Moves a saved-for-later line back into the cart.
async fn move_back_to_cart(
    State(state): State<SharedState>,
    Json(payload): Json<ItemRefInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| cart.move_to_cart(&payload.product_id));

    updated(session_id)
}

/// Endpoint: POST /cart/saved/remove
async fn remove_saved(
    State(state): State<SharedState>,
    Json(payload): Json<ItemRefInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| cart.remove_saved(&payload.product_id));

    updated(session_id)
}

/// Endpoint: POST /cart/coupon
/// Applies a coupon code; an unrecognized code yields 422 and leaves the
/// cart untouched.
async fn apply_coupon(
    State(state): State<SharedState>,
    Json(payload): Json<CouponInput>,
) -> Result<impl IntoResponse, StoreError> {
    let session_id = get_or_create_session_id(payload.session_id);

    let applied = state.with_cart(&session_id, |cart| {
        cart.apply_coupon(&payload.code, state.coupons())
    })?;
    info!(session = %session_id, code = %applied.code, "coupon applied");

    Ok(updated(session_id))
}

/// Endpoint: POST /cart/coupon/remove
async fn remove_coupon(
    State(state): State<SharedState>,
    Json(payload): Json<SessionInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_cart(&session_id, |cart| cart.remove_coupon());

    updated(session_id)
}

/// Endpoint: POST /cart/view
/// Returns both collections plus the derived order summary, rounded for
/// display.
async fn view_cart(
    State(state): State<SharedState>,
    Json(payload): Json<SessionInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    let view = state.with_cart(&session_id, |cart| CartView {
        session_id: session_id.clone(),
        items: cart.items().to_vec(),
        saved_for_later: cart.saved_items().to_vec(),
        coupon: cart.coupon().cloned(),
        summary: cart.summary(state.pricing()).rounded(),
    });

    Json(view)
}

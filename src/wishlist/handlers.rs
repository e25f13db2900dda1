//! REST API handlers for wishlist operations

use super::models::*;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};

use crate::cart::models::{SessionInput, SyncResponse};
use crate::cart::state::SharedState;
use crate::helpers::get_or_create_session_id;

/// Creates routes for wishlist-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/wishlist/items", post(add_item))
        .route("/wishlist/remove", post(remove_item))
        .route("/wishlist/clear", post(clear_wishlist))
        .route("/wishlist/view", post(view_wishlist))
}

fn updated(session_id: String) -> Json<SyncResponse> {
    Json(SyncResponse {
        status: "updated".to_string(),
        session_id,
    })
}

/// Endpoint: POST /wishlist/items
/// Adds a product to the session's wishlist; re-adding an id is a no-op.
async fn add_item(
    State(state): State<SharedState>,
    Json(payload): Json<AddWishlistInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_wishlist(&session_id, |wishlist| wishlist.add(payload.product));

    updated(session_id)
}

/// Endpoint: POST /wishlist/remove
async fn remove_item(
    State(state): State<SharedState>,
    Json(payload): Json<WishlistRefInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_wishlist(&session_id, |wishlist| wishlist.remove(&payload.id));

    updated(session_id)
}

/// Endpoint: POST /wishlist/clear
async fn clear_wishlist(
    State(state): State<SharedState>,
    Json(payload): Json<SessionInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    state.with_wishlist(&session_id, |wishlist| wishlist.clear());

    updated(session_id)
}

/// Endpoint: POST /wishlist/view
async fn view_wishlist(
    State(state): State<SharedState>,
    Json(payload): Json<SessionInput>,
) -> impl IntoResponse {
    let session_id = get_or_create_session_id(payload.session_id);

    let view = state.with_wishlist(&session_id, |wishlist| WishlistView {
        session_id: session_id.clone(),
        items: wishlist.items().to_vec(),
        count: wishlist.count(),
    });

    Json(view)
}

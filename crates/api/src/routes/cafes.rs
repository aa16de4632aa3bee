//! Route definitions for the `/cafes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{cafe_listings, ratings};
use crate::state::AppState;

/// Routes mounted at `/cafes`.
///
/// ```text
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// GET    /{id}/ratings   -> ratings::list_for_listing
/// POST   /{id}/ratings   -> ratings::create_for_listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(cafe_listings::get_by_id)
                .put(cafe_listings::update)
                .delete(cafe_listings::delete),
        )
        .route(
            "/{id}/ratings",
            get(ratings::list_for_listing).post(ratings::create_for_listing),
        )
}

//! Routes scoped to the authenticated caller.

use axum::routing::get;
use axum::Router;

use crate::handlers::{cafe_listings, ratings};
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET  /cafes    -> cafe_listings::list_mine
/// POST /cafes    -> cafe_listings::create_mine
/// GET  /ratings  -> ratings::list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/cafes",
            get(cafe_listings::list_mine).post(cafe_listings::create_mine),
        )
        .route("/ratings", get(ratings::list_mine))
}

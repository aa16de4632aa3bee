//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{cafe_listings, ratings, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// GET    /{id}/cafes     -> cafe_listings::list_for_user
/// POST   /{id}/cafes     -> cafe_listings::create_for_user
/// GET    /{id}/ratings   -> ratings::list_for_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
        .route(
            "/{id}/cafes",
            get(cafe_listings::list_for_user).post(cafe_listings::create_for_user),
        )
        .route("/{id}/ratings", get(ratings::list_for_user))
}

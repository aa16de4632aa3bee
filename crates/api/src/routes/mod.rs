pub mod auth;
pub mod cafes;
pub mod health;
pub mod me;
pub mod ratings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /users                                           list, create
/// /users/{id}                                      get, update, delete (self only)
/// /users/{id}/cafes                                list, create (self only)
/// /users/{id}/ratings                              list (self only)
///
/// /me/cafes                                        list, create
/// /me/ratings                                      list
///
/// /cafes/{id}                                      get (public), update, delete (owner)
/// /cafes/{id}/ratings                              list (public), create (visited only)
///
/// /ratings/{id}                                    get (public), update, delete (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/me", me::router())
        .nest("/cafes", cafes::router())
        .nest("/ratings", ratings::router())
}

//! HTTP request handlers.
//!
//! Handlers parse the request, call a repository or service, and wrap the
//! result in the `{ "data": ... }` envelope.

pub mod auth;
pub mod cafe_listings;
pub mod ratings;
pub mod users;

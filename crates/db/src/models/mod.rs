//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table row. Listing
//! and rating rows convert into their `cafe_core` domain types.

pub mod cafe_listing;
pub mod rating;
pub mod user;

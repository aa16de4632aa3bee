pub mod error;
pub mod listing;
pub mod ownership;
pub mod rating;
pub mod types;
pub mod visit_status;

#[cfg(test)]
mod test_support;

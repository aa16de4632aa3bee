use std::sync::Arc;

use cafe_core::listing::{ListingService, VisitedLookup};
use cafe_core::rating::RatingService;
use cafe_db::stores::{PgListingStore, PgRatingStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cafe_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub listings: Arc<ListingService<PgListingStore>>,
    pub ratings: Arc<RatingService<PgRatingStore>>,
}

impl AppState {
    /// Wire the services onto `pool`. The rating service checks the visited
    /// precondition through the listing service.
    pub fn new(pool: cafe_db::DbPool, config: ServerConfig) -> Self {
        let listings = Arc::new(ListingService::new(PgListingStore::new(pool.clone())));
        let lookup: Arc<dyn VisitedLookup> = listings.clone();
        let ratings = Arc::new(RatingService::new(
            PgRatingStore::new(pool.clone()),
            Some(lookup),
        ));

        Self {
            pool,
            config: Arc::new(config),
            listings,
            ratings,
        }
    }
}

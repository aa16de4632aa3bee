//! Postgres adapters for the `cafe_core` store ports.
//!
//! Each adapter delegates to its repository and wraps `sqlx` failures with
//! [`CoreError::store`], leaving classification to the HTTP layer.

use async_trait::async_trait;
use cafe_core::error::CoreError;
use cafe_core::listing::{Listing, ListingChanges, ListingFilter, ListingStore, NewListing};
use cafe_core::rating::{NewRating, Rating, RatingChanges, RatingStore};
use cafe_core::types::DbId;

use crate::repositories::{CafeListingRepo, RatingRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgListingStore {
    pool: DbPool,
}

impl PgListingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn create(&self, input: &NewListing) -> Result<Listing, CoreError> {
        let row = CafeListingRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::store)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Listing>, CoreError> {
        CafeListingRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::store)?
            .map(Listing::try_from)
            .transpose()
    }

    async fn find_by_owner(
        &self,
        owner_id: DbId,
        filter: &ListingFilter,
    ) -> Result<Vec<Listing>, CoreError> {
        CafeListingRepo::list_by_owner(&self.pool, owner_id, filter)
            .await
            .map_err(CoreError::store)?
            .into_iter()
            .map(Listing::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: DbId,
        changes: &ListingChanges,
    ) -> Result<Option<Listing>, CoreError> {
        CafeListingRepo::update(&self.pool, id, changes)
            .await
            .map_err(CoreError::store)?
            .map(Listing::try_from)
            .transpose()
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        CafeListingRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::store)
    }
}

#[derive(Clone)]
pub struct PgRatingStore {
    pool: DbPool,
}

impl PgRatingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for PgRatingStore {
    async fn create(&self, input: &NewRating) -> Result<Rating, CoreError> {
        let row = RatingRepo::create(&self.pool, input)
            .await
            .map_err(CoreError::store)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Rating>, CoreError> {
        let row = RatingRepo::find_by_id(&self.pool, id)
            .await
            .map_err(CoreError::store)?;
        Ok(row.map(Rating::from))
    }

    async fn find_by_listing(&self, listing_id: DbId) -> Result<Vec<Rating>, CoreError> {
        let rows = RatingRepo::list_by_listing(&self.pool, listing_id)
            .await
            .map_err(CoreError::store)?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn find_by_owner(&self, owner_id: DbId) -> Result<Vec<Rating>, CoreError> {
        let rows = RatingRepo::list_by_owner(&self.pool, owner_id)
            .await
            .map_err(CoreError::store)?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn update(&self, id: DbId, changes: &RatingChanges) -> Result<Option<Rating>, CoreError> {
        let row = RatingRepo::update(&self.pool, id, changes)
            .await
            .map_err(CoreError::store)?;
        Ok(row.map(Rating::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        RatingRepo::delete(&self.pool, id)
            .await
            .map_err(CoreError::store)
    }
}

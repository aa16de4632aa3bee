//! Ratings: domain types, the store port, and the rating service.
//!
//! A rating can only be created against a listing its author has already
//! visited. The check goes through [`VisitedLookup`]; when no lookup is
//! configured the precondition is skipped.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::listing::VisitedLookup;
use crate::ownership::{require_found, require_owned, Owned};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub owner_id: DbId,
    pub listing_id: DbId,
    pub visited_at: Timestamp,
    pub score: i32,
    pub review: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Rating {
    const ENTITY: &'static str = "Rating";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// Client-supplied rating fields. The score is accepted as `score` or
/// `rating`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RatingDraft {
    #[serde(default)]
    pub visited_at: Option<Timestamp>,
    #[serde(alias = "rating")]
    #[validate(range(min = 1, max = 5, message = "score must be between 1 and 5"))]
    pub score: i32,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub owner_id: DbId,
    pub listing_id: DbId,
    pub visited_at: Timestamp,
    pub score: i32,
    pub review: String,
}

/// The mutable rating fields. Owner and listing are fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChanges {
    pub visited_at: Timestamp,
    pub score: i32,
    pub review: String,
}

/// Persistence port for ratings. Same contract as the listing store.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn create(&self, input: &NewRating) -> Result<Rating, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Rating>, CoreError>;

    /// Newest first.
    async fn find_by_listing(&self, listing_id: DbId) -> Result<Vec<Rating>, CoreError>;

    /// Newest first.
    async fn find_by_owner(&self, owner_id: DbId) -> Result<Vec<Rating>, CoreError>;

    async fn update(&self, id: DbId, changes: &RatingChanges) -> Result<Option<Rating>, CoreError>;

    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

pub struct RatingService<S> {
    store: S,
    listings: Option<Arc<dyn VisitedLookup>>,
}

impl<S: RatingStore> RatingService<S> {
    /// `listings: None` runs without the visited precondition.
    pub fn new(store: S, listings: Option<Arc<dyn VisitedLookup>>) -> Self {
        Self { store, listings }
    }

    pub async fn get_by_id(&self, id: DbId) -> Result<Rating, CoreError> {
        let found = self.store.find_by_id(id).await?;
        require_found(found, id)
    }

    pub async fn list_by_listing(&self, listing_id: DbId) -> Result<Vec<Rating>, CoreError> {
        self.store.find_by_listing(listing_id).await
    }

    pub async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Rating>, CoreError> {
        self.store.find_by_owner(owner_id).await
    }

    pub async fn create(
        &self,
        owner_id: DbId,
        listing_id: DbId,
        draft: &RatingDraft,
    ) -> Result<Rating, CoreError> {
        draft.validate()?;

        if let Some(listings) = &self.listings {
            if !listings.is_visited(listing_id).await? {
                return Err(CoreError::CafeNotVisited { listing_id });
            }
        }

        let input = NewRating {
            owner_id,
            listing_id,
            visited_at: draft.visited_at.unwrap_or_else(Utc::now),
            score: draft.score,
            review: draft.review.clone(),
        };
        let rating = self.store.create(&input).await?;

        tracing::info!(
            rating_id = rating.id,
            listing_id,
            owner_id,
            score = rating.score,
            "Rating created",
        );
        Ok(rating)
    }

    /// Replace score and review. An omitted `visited_at` keeps the stored one.
    pub async fn update(
        &self,
        id: DbId,
        caller_id: DbId,
        draft: &RatingDraft,
    ) -> Result<Rating, CoreError> {
        let current = require_owned(self.store.find_by_id(id).await?, id, caller_id)?;
        draft.validate()?;

        let changes = RatingChanges {
            visited_at: draft.visited_at.unwrap_or(current.visited_at),
            score: draft.score,
            review: draft.review.clone(),
        };
        let updated = self
            .store
            .update(current.id, &changes)
            .await?
            .ok_or(CoreError::NotFound {
                entity: Rating::ENTITY,
                id,
            })?;

        tracing::info!(rating_id = id, user_id = caller_id, "Rating updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: DbId, caller_id: DbId) -> Result<(), CoreError> {
        let current = require_owned(self.store.find_by_id(id).await?, id, caller_id)?;

        if !self.store.delete(current.id).await? {
            return Err(CoreError::NotFound {
                entity: Rating::ENTITY,
                id,
            });
        }

        tracing::info!(rating_id = id, user_id = caller_id, "Rating deleted");
        Ok(())
    }
}

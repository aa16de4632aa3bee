//! In-memory stores for service tests.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::CoreError;
use crate::listing::{
    Listing, ListingChanges, ListingFilter, ListingSort, ListingStore, NewListing, VisitedLookup,
};
use crate::rating::{NewRating, Rating, RatingChanges, RatingStore};
use crate::types::{DbId, Timestamp};

/// Strictly increasing timestamps so ordering by time is deterministic.
#[derive(Default)]
struct Clock {
    ticks: AtomicI64,
}

impl Clock {
    fn now(&self) -> Timestamp {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Utc::now() + Duration::milliseconds(tick)
    }
}

struct Table<T> {
    rows: Mutex<Vec<T>>,
    next_id: AtomicI64,
    clock: Clock,
    /// Ids that disappear between the ownership read and the write.
    vanishing: Mutex<HashSet<DbId>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(0),
            clock: Clock::default(),
            vanishing: Mutex::new(HashSet::new()),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn vanished(&self, id: DbId) -> bool {
        self.vanishing.lock().unwrap().contains(&id)
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InMemoryListingStore {
    inner: Arc<Table<Listing>>,
}

impl InMemoryListingStore {
    pub fn len(&self) -> usize {
        self.inner.rows.lock().unwrap().len()
    }

    pub fn vanish_on_write(&self, id: DbId) {
        self.inner.vanishing.lock().unwrap().insert(id);
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn create(&self, input: &NewListing) -> Result<Listing, CoreError> {
        let now = self.inner.clock.now();
        let listing = Listing {
            id: self.inner.next_id(),
            owner_id: input.owner_id,
            name: input.name.clone(),
            address: input.address.clone(),
            description: input.description.clone(),
            visit_status: input.visit_status,
            created_at: now,
            updated_at: now,
        };
        self.inner.rows.lock().unwrap().push(listing.clone());
        Ok(listing)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Listing>, CoreError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: DbId,
        filter: &ListingFilter,
    ) -> Result<Vec<Listing>, CoreError> {
        let rows = self.inner.rows.lock().unwrap();
        let mut found: Vec<Listing> = rows
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .filter(|l| filter.visit_status.map_or(true, |s| l.visit_status == s))
            .cloned()
            .collect();

        match filter.sort {
            ListingSort::UpdatedDesc => found.sort_by_key(|l| Reverse(l.updated_at)),
            ListingSort::CreatedDesc => found.sort_by_key(|l| Reverse(l.created_at)),
            ListingSort::NameAsc => found.sort_by(|a, b| a.name.cmp(&b.name)),
            ListingSort::NameDesc => found.sort_by(|a, b| b.name.cmp(&a.name)),
            ListingSort::StatusAsc => {
                found.sort_by_key(|l| (l.visit_status.as_str(), Reverse(l.updated_at)))
            }
            ListingSort::StatusDesc => {
                found.sort_by_key(|l| (Reverse(l.visit_status.as_str()), Reverse(l.updated_at)))
            }
        }
        Ok(found)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &ListingChanges,
    ) -> Result<Option<Listing>, CoreError> {
        if self.inner.vanished(id) {
            return Ok(None);
        }
        let now = self.inner.clock.now();
        let mut rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|l| l.id == id).map(|l| {
            l.name = changes.name.clone();
            l.address = changes.address.clone();
            l.description = changes.description.clone();
            l.visit_status = changes.visit_status;
            l.updated_at = now;
            l.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        if self.inner.vanished(id) {
            return Ok(false);
        }
        let mut rows = self.inner.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() < before)
    }
}

/// Every call fails the way a lost database connection would.
pub struct FailingListingStore;

fn connection_lost() -> CoreError {
    CoreError::store(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

#[async_trait]
impl ListingStore for FailingListingStore {
    async fn create(&self, _input: &NewListing) -> Result<Listing, CoreError> {
        Err(connection_lost())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Listing>, CoreError> {
        Err(connection_lost())
    }

    async fn find_by_owner(
        &self,
        _owner_id: DbId,
        _filter: &ListingFilter,
    ) -> Result<Vec<Listing>, CoreError> {
        Err(connection_lost())
    }

    async fn update(
        &self,
        _id: DbId,
        _changes: &ListingChanges,
    ) -> Result<Option<Listing>, CoreError> {
        Err(connection_lost())
    }

    async fn delete(&self, _id: DbId) -> Result<bool, CoreError> {
        Err(connection_lost())
    }
}

/// Fixed answer for the visited precondition.
pub struct StubLookup {
    answer: Option<bool>,
}

impl StubLookup {
    pub fn answering(visited: bool) -> Arc<dyn VisitedLookup> {
        Arc::new(Self {
            answer: Some(visited),
        })
    }

    /// Behaves as if the listing does not exist.
    pub fn missing() -> Arc<dyn VisitedLookup> {
        Arc::new(Self { answer: None })
    }
}

#[async_trait]
impl VisitedLookup for StubLookup {
    async fn is_visited(&self, listing_id: DbId) -> Result<bool, CoreError> {
        self.answer.ok_or(CoreError::NotFound {
            entity: "CafeListing",
            id: listing_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct InMemoryRatingStore {
    inner: Arc<Table<Rating>>,
}

impl InMemoryRatingStore {
    pub fn len(&self) -> usize {
        self.inner.rows.lock().unwrap().len()
    }

    pub fn vanish_on_write(&self, id: DbId) {
        self.inner.vanishing.lock().unwrap().insert(id);
    }

    fn newest_first(&self, keep: impl Fn(&Rating) -> bool) -> Vec<Rating> {
        let rows = self.inner.rows.lock().unwrap();
        let mut found: Vec<Rating> = rows.iter().filter(|r| keep(r)).cloned().collect();
        found.sort_by_key(|r| Reverse(r.created_at));
        found
    }
}

#[async_trait]
impl RatingStore for InMemoryRatingStore {
    async fn create(&self, input: &NewRating) -> Result<Rating, CoreError> {
        let now = self.inner.clock.now();
        let rating = Rating {
            id: self.inner.next_id(),
            owner_id: input.owner_id,
            listing_id: input.listing_id,
            visited_at: input.visited_at,
            score: input.score,
            review: input.review.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner.rows.lock().unwrap().push(rating.clone());
        Ok(rating)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Rating>, CoreError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_listing(&self, listing_id: DbId) -> Result<Vec<Rating>, CoreError> {
        Ok(self.newest_first(|r| r.listing_id == listing_id))
    }

    async fn find_by_owner(&self, owner_id: DbId) -> Result<Vec<Rating>, CoreError> {
        Ok(self.newest_first(|r| r.owner_id == owner_id))
    }

    async fn update(&self, id: DbId, changes: &RatingChanges) -> Result<Option<Rating>, CoreError> {
        if self.inner.vanished(id) {
            return Ok(None);
        }
        let now = self.inner.clock.now();
        let mut rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|r| {
            r.visited_at = changes.visited_at;
            r.score = changes.score;
            r.review = changes.review.clone();
            r.updated_at = now;
            r.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        if self.inner.vanished(id) {
            return Ok(false);
        }
        let mut rows = self.inner.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

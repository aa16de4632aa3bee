//! Cafe listings: domain types, the store port, and the owner-gated service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::ownership::{require_found, require_owned, Owned};
use crate::types::{DbId, Timestamp};
use crate::visit_status::{normalize_visit_status, normalize_visit_status_filter, VisitStatus};

/// A cafe listing owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub address: String,
    pub description: String,
    pub visit_status: VisitStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Listing {
    const ENTITY: &'static str = "CafeListing";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.owner_id
    }
}

/// Client-supplied listing fields, used for both create and update.
///
/// `visit_status` is raw input; it is normalized by the service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListingDraft {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visit_status: Option<String>,
}

/// Normalized insert passed to [`ListingStore::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub owner_id: DbId,
    pub name: String,
    pub address: String,
    pub description: String,
    pub visit_status: VisitStatus,
}

/// The mutable listing fields. Owner and id are not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingChanges {
    pub name: String,
    pub address: String,
    pub description: String,
    pub visit_status: VisitStatus,
}

/// Ordering of an owner's listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingSort {
    #[default]
    UpdatedDesc,
    CreatedDesc,
    NameAsc,
    NameDesc,
    /// Visit status ascending, then most recently updated first.
    StatusAsc,
    /// Visit status descending, then most recently updated first.
    StatusDesc,
}

impl ListingSort {
    /// Parse a `sort` query value. Unknown values fall back to the default
    /// (`updated_desc`) rather than being rejected.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "created_desc" => ListingSort::CreatedDesc,
            "name_asc" => ListingSort::NameAsc,
            "name_desc" => ListingSort::NameDesc,
            "status_asc" => ListingSort::StatusAsc,
            "status_desc" => ListingSort::StatusDesc,
            _ => ListingSort::UpdatedDesc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingSort::UpdatedDesc => "updated_desc",
            ListingSort::CreatedDesc => "created_desc",
            ListingSort::NameAsc => "name_asc",
            ListingSort::NameDesc => "name_desc",
            ListingSort::StatusAsc => "status_asc",
            ListingSort::StatusDesc => "status_desc",
        }
    }
}

/// Normalized filter passed to [`ListingStore::find_by_owner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub visit_status: Option<VisitStatus>,
    pub sort: ListingSort,
}

/// Raw `?visit_status=&sort=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub visit_status: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    /// Normalize into a store filter. A non-blank, unrecognised visit status
    /// fails with [`CoreError::InvalidVisitStatus`].
    pub fn to_filter(&self) -> Result<ListingFilter, CoreError> {
        Ok(ListingFilter {
            visit_status: normalize_visit_status_filter(self.visit_status.as_deref())?,
            sort: ListingSort::from_param(self.sort.as_deref().unwrap_or_default()),
        })
    }
}

/// Persistence port for listings.
///
/// `update` returns `None` and `delete` returns `false` when the row does
/// not exist at write time.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn create(&self, input: &NewListing) -> Result<Listing, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Listing>, CoreError>;

    async fn find_by_owner(
        &self,
        owner_id: DbId,
        filter: &ListingFilter,
    ) -> Result<Vec<Listing>, CoreError>;

    async fn update(&self, id: DbId, changes: &ListingChanges)
        -> Result<Option<Listing>, CoreError>;

    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Narrow capability consumed by the rating service: is this listing visited?
#[async_trait]
pub trait VisitedLookup: Send + Sync {
    /// Fails with [`CoreError::NotFound`] when the listing does not exist.
    async fn is_visited(&self, listing_id: DbId) -> Result<bool, CoreError>;
}

/// Owner-gated listing operations.
pub struct ListingService<S> {
    store: S,
}

impl<S: ListingStore> ListingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Public read; no ownership check.
    pub async fn get_by_id(&self, id: DbId) -> Result<Listing, CoreError> {
        let found = self.store.find_by_id(id).await?;
        require_found(found, id)
    }

    pub async fn list_by_owner(
        &self,
        owner_id: DbId,
        query: &ListingQuery,
    ) -> Result<Vec<Listing>, CoreError> {
        let filter = query.to_filter()?;
        self.store.find_by_owner(owner_id, &filter).await
    }

    pub async fn create(&self, owner_id: DbId, draft: &ListingDraft) -> Result<Listing, CoreError> {
        draft.validate()?;
        let visit_status = normalize_visit_status(draft.visit_status.as_deref())?;

        let input = NewListing {
            owner_id,
            name: draft.name.clone(),
            address: draft.address.clone(),
            description: draft.description.clone(),
            visit_status,
        };
        let listing = self.store.create(&input).await?;

        tracing::info!(
            listing_id = listing.id,
            owner_id,
            visit_status = %listing.visit_status,
            "Cafe listing created",
        );
        Ok(listing)
    }

    /// Replace name, address, description and visit status of a listing
    /// owned by `caller_id`.
    pub async fn update(
        &self,
        id: DbId,
        caller_id: DbId,
        draft: &ListingDraft,
    ) -> Result<Listing, CoreError> {
        let current = require_owned(self.store.find_by_id(id).await?, id, caller_id)?;
        draft.validate()?;
        let visit_status = normalize_visit_status(draft.visit_status.as_deref())?;

        let changes = ListingChanges {
            name: draft.name.clone(),
            address: draft.address.clone(),
            description: draft.description.clone(),
            visit_status,
        };
        // The row may have been deleted since the ownership check.
        let updated = self
            .store
            .update(current.id, &changes)
            .await?
            .ok_or(CoreError::NotFound {
                entity: Listing::ENTITY,
                id,
            })?;

        tracing::info!(
            listing_id = id,
            user_id = caller_id,
            visit_status = %updated.visit_status,
            "Cafe listing updated",
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: DbId, caller_id: DbId) -> Result<(), CoreError> {
        let current = require_owned(self.store.find_by_id(id).await?, id, caller_id)?;

        if !self.store.delete(current.id).await? {
            return Err(CoreError::NotFound {
                entity: Listing::ENTITY,
                id,
            });
        }

        tracing::info!(listing_id = id, user_id = caller_id, "Cafe listing deleted");
        Ok(())
    }

    pub async fn is_listing_visited(&self, id: DbId) -> Result<bool, CoreError> {
        let listing = self.get_by_id(id).await?;
        Ok(listing.visit_status.is_visited())
    }
}

#[async_trait]
impl<S: ListingStore> VisitedLookup for ListingService<S> {
    async fn is_visited(&self, listing_id: DbId) -> Result<bool, CoreError> {
        self.is_listing_visited(listing_id).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::test_support::{FailingListingStore, InMemoryListingStore};

    const OWNER: DbId = 1;
    const STRANGER: DbId = 2;

    fn draft(name: &str, status: Option<&str>) -> ListingDraft {
        ListingDraft {
            name: name.to_string(),
            address: "1 Bean St".to_string(),
            description: "flat whites".to_string(),
            visit_status: status.map(str::to_string),
        }
    }

    fn service() -> ListingService<InMemoryListingStore> {
        ListingService::new(InMemoryListingStore::default())
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_without_status_defaults_to_to_visit() {
        let svc = service();
        let listing = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        assert_eq!(listing.visit_status, VisitStatus::ToVisit);
        assert_eq!(listing.owner_id, OWNER);

        let stored = svc.get_by_id(listing.id).await.unwrap();
        assert_eq!(stored.visit_status, VisitStatus::ToVisit);
    }

    #[tokio::test]
    async fn test_create_normalizes_mixed_case_status() {
        let svc = service();
        let listing = svc
            .create(OWNER, &draft("Kopi", Some(" VISITED ")))
            .await
            .unwrap();
        assert_eq!(listing.visit_status, VisitStatus::Visited);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_status_without_writing() {
        let store = InMemoryListingStore::default();
        let svc = ListingService::new(store.clone());

        let result = svc.create(OWNER, &draft("Kopi", Some("bogus"))).await;

        assert_matches!(result, Err(CoreError::InvalidVisitStatus(_)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let svc = service();
        let result = svc.create(OWNER, &draft("", None)).await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_owner_update_keeps_owner_and_id() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        let updated = svc
            .update(created.id, OWNER, &draft("Kopi Tiam", Some("Visited")))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, OWNER);
        assert_eq!(updated.name, "Kopi Tiam");
        assert_eq!(updated.visit_status, VisitStatus::Visited);
    }

    #[tokio::test]
    async fn test_non_owner_update_fails_and_leaves_listing_unchanged() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        let result = svc.update(created.id, STRANGER, &draft("X", None)).await;

        assert_matches!(result, Err(CoreError::NotOwner { entity: "CafeListing", .. }));
        let stored = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(stored.name, "Kopi");
    }

    #[tokio::test]
    async fn test_update_missing_listing_is_not_found() {
        let svc = service();
        let result = svc.update(42, OWNER, &draft("X", None)).await;
        assert_matches!(result, Err(CoreError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_status_for_owner() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        let result = svc
            .update(created.id, OWNER, &draft("Kopi", Some("maybe")))
            .await;

        assert_matches!(result, Err(CoreError::InvalidVisitStatus(_)));
    }

    #[tokio::test]
    async fn test_ownership_is_checked_before_status_validation() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        let result = svc
            .update(created.id, STRANGER, &draft("Kopi", Some("maybe")))
            .await;

        assert_matches!(result, Err(CoreError::NotOwner { .. }));
    }

    #[tokio::test]
    async fn test_update_vanished_row_reports_not_found() {
        let store = InMemoryListingStore::default();
        let svc = ListingService::new(store.clone());
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        store.vanish_on_write(created.id);
        let result = svc.update(created.id, OWNER, &draft("Kopi", None)).await;

        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_owner_delete_removes_listing() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        svc.delete(created.id, OWNER).await.unwrap();

        assert_matches!(
            svc.get_by_id(created.id).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_non_owner_delete_fails() {
        let svc = service();
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        let result = svc.delete(created.id, STRANGER).await;

        assert_matches!(result, Err(CoreError::NotOwner { .. }));
        assert!(svc.get_by_id(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_listing_is_not_found() {
        let svc = service();
        let result = svc.delete(999, OWNER).await;
        assert_matches!(result, Err(CoreError::NotFound { id: 999, .. }));
    }

    #[tokio::test]
    async fn test_delete_vanished_row_reports_not_found() {
        let store = InMemoryListingStore::default();
        let svc = ListingService::new(store.clone());
        let created = svc.create(OWNER, &draft("Kopi", None)).await.unwrap();

        store.vanish_on_write(created.id);
        let result = svc.delete(created.id, OWNER).await;

        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_is_visited_reflects_status() {
        let svc = service();
        let todo = svc.create(OWNER, &draft("A", None)).await.unwrap();
        let done = svc.create(OWNER, &draft("B", Some("visited"))).await.unwrap();

        assert!(!svc.is_visited(todo.id).await.unwrap());
        assert!(svc.is_visited(done.id).await.unwrap());
        assert_matches!(svc.is_visited(77).await, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_by_owner_filters_and_sorts() {
        let svc = service();
        svc.create(OWNER, &draft("Bravo", Some("visited"))).await.unwrap();
        svc.create(OWNER, &draft("Alpha", None)).await.unwrap();
        svc.create(OWNER, &draft("Charlie", Some("visited"))).await.unwrap();
        svc.create(STRANGER, &draft("Delta", None)).await.unwrap();

        let by_name = svc
            .list_by_owner(
                OWNER,
                &ListingQuery {
                    visit_status: None,
                    sort: Some("name_asc".into()),
                },
            )
            .await
            .unwrap();
        let names: Vec<_> = by_name.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);

        let visited = svc
            .list_by_owner(
                OWNER,
                &ListingQuery {
                    visit_status: Some("VISITED".into()),
                    sort: Some("name_desc".into()),
                },
            )
            .await
            .unwrap();
        let names: Vec<_> = visited.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Charlie", "Bravo"]);
    }

    #[tokio::test]
    async fn test_list_by_owner_default_and_unknown_sort_is_updated_desc() {
        let svc = service();
        let first = svc.create(OWNER, &draft("First", None)).await.unwrap();
        svc.create(OWNER, &draft("Second", None)).await.unwrap();
        svc.update(first.id, OWNER, &draft("First", None)).await.unwrap();

        for sort in [None, Some("sideways".to_string())] {
            let listings = svc
                .list_by_owner(
                    OWNER,
                    &ListingQuery {
                        visit_status: None,
                        sort,
                    },
                )
                .await
                .unwrap();
            assert_eq!(listings[0].id, first.id, "most recently updated comes first");
        }
    }

    #[tokio::test]
    async fn test_status_sort_breaks_ties_by_updated_desc() {
        let svc = service();
        let older = svc.create(OWNER, &draft("Older", Some("visited"))).await.unwrap();
        let newer = svc.create(OWNER, &draft("Newer", Some("visited"))).await.unwrap();
        let todo = svc.create(OWNER, &draft("Todo", None)).await.unwrap();

        let listings = svc
            .list_by_owner(
                OWNER,
                &ListingQuery {
                    visit_status: None,
                    sort: Some("status_asc".into()),
                },
            )
            .await
            .unwrap();
        let ids: Vec<_> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, [todo.id, newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_list_by_owner_rejects_unknown_status_filter() {
        let svc = service();
        let result = svc
            .list_by_owner(
                OWNER,
                &ListingQuery {
                    visit_status: Some("someday".into()),
                    sort: None,
                },
            )
            .await;
        assert_matches!(result, Err(CoreError::InvalidVisitStatus(_)));
    }

    #[test]
    fn test_sort_param_parsing() {
        assert_eq!(ListingSort::from_param(""), ListingSort::UpdatedDesc);
        assert_eq!(ListingSort::from_param("created_desc"), ListingSort::CreatedDesc);
        assert_eq!(ListingSort::from_param("status_desc"), ListingSort::StatusDesc);
        assert_eq!(ListingSort::from_param("NAME_ASC"), ListingSort::UpdatedDesc);
    }

    #[tokio::test]
    async fn test_store_failures_propagate_unchanged() {
        let svc = ListingService::new(FailingListingStore);
        let result = svc.update(1, OWNER, &draft("X", None)).await;
        assert_matches!(result, Err(CoreError::Store(_)));
    }
}

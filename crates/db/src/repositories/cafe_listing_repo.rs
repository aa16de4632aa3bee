//! Repository for the `cafe_listings` table.

use cafe_core::listing::{ListingChanges, ListingFilter, ListingSort, NewListing};
use cafe_core::types::DbId;
use sqlx::PgPool;

use crate::models::cafe_listing::CafeListingRow;

const COLUMNS: &str = "id, owner_id, name, address, description, visit_status, \
                       created_at, updated_at";

/// `ORDER BY` clause for each supported sort. Never built from user input.
fn order_by(sort: ListingSort) -> &'static str {
    match sort {
        ListingSort::UpdatedDesc => "updated_at DESC, id DESC",
        ListingSort::CreatedDesc => "created_at DESC, id DESC",
        ListingSort::NameAsc => "name ASC, id ASC",
        ListingSort::NameDesc => "name DESC, id DESC",
        ListingSort::StatusAsc => "visit_status ASC, updated_at DESC, id DESC",
        ListingSort::StatusDesc => "visit_status DESC, updated_at DESC, id DESC",
    }
}

pub struct CafeListingRepo;

impl CafeListingRepo {
    pub async fn create(pool: &PgPool, input: &NewListing) -> Result<CafeListingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO cafe_listings (owner_id, name, address, description, visit_status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CafeListingRow>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.description)
            .bind(input.visit_status.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CafeListingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cafe_listings WHERE id = $1");
        sqlx::query_as::<_, CafeListingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's listings, optionally restricted to one visit status.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        filter: &ListingFilter,
    ) -> Result<Vec<CafeListingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cafe_listings
             WHERE owner_id = $1 AND ($2::TEXT IS NULL OR visit_status = $2)
             ORDER BY {}",
            order_by(filter.sort)
        );
        sqlx::query_as::<_, CafeListingRow>(&query)
            .bind(owner_id)
            .bind(filter.visit_status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Replace the mutable fields. Returns `None` if the row is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ListingChanges,
    ) -> Result<Option<CafeListingRow>, sqlx::Error> {
        let query = format!(
            "UPDATE cafe_listings SET
                name = $2,
                address = $3,
                description = $4,
                visit_status = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CafeListingRow>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.address)
            .bind(&changes.description)
            .bind(changes.visit_status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a listing. Its ratings cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cafe_listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

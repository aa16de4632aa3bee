//! Repository for the `ratings` table.

use cafe_core::rating::{NewRating, RatingChanges};
use cafe_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::RatingRow;

const COLUMNS: &str = "id, owner_id, listing_id, visited_at, score, review, created_at, updated_at";

pub struct RatingRepo;

impl RatingRepo {
    pub async fn create(pool: &PgPool, input: &NewRating) -> Result<RatingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (owner_id, listing_id, visited_at, score, review)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(input.owner_id)
            .bind(input.listing_id)
            .bind(input.visited_at)
            .bind(input.score)
            .bind(&input.review)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RatingRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ratings for one listing, newest first.
    pub async fn list_by_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<RatingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE listing_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }

    /// Ratings written by one user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<RatingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Replace visited_at, score and review. Returns `None` if the row is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &RatingChanges,
    ) -> Result<Option<RatingRow>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET
                visited_at = $2,
                score = $3,
                review = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(id)
            .bind(changes.visited_at)
            .bind(changes.score)
            .bind(&changes.review)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use cafe_core::rating::Rating;
use cafe_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `ratings` table.
#[derive(Debug, Clone, FromRow)]
pub struct RatingRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub listing_id: DbId,
    pub visited_at: Timestamp,
    pub score: i32,
    pub review: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            owner_id: row.owner_id,
            listing_id: row.listing_id,
            visited_at: row.visited_at,
            score: row.score,
            review: row.review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

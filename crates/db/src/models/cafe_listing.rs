use cafe_core::error::CoreError;
use cafe_core::listing::Listing;
use cafe_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `cafe_listings` table. `visit_status` is stored as TEXT.
#[derive(Debug, Clone, FromRow)]
pub struct CafeListingRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub address: String,
    pub description: String,
    pub visit_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<CafeListingRow> for Listing {
    type Error = CoreError;

    fn try_from(row: CafeListingRow) -> Result<Self, Self::Error> {
        Ok(Listing {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: row.address,
            description: row.description,
            visit_status: row.visit_status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

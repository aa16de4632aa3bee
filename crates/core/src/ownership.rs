//! Ownership checks shared by user-owned resources.
//!
//! Listings and ratings are mutated only by the user recorded as their owner
//! at creation time. Existence is always established before ownership.

use crate::error::CoreError;
use crate::types::DbId;

/// A resource with a single owning user.
pub trait Owned {
    /// Entity name used in error messages (e.g. `"CafeListing"`).
    const ENTITY: &'static str;

    fn id(&self) -> DbId;

    fn owner_id(&self) -> DbId;

    fn is_owned_by(&self, user_id: DbId) -> bool {
        self.owner_id() == user_id
    }

    /// Returns [`CoreError::NotOwner`] unless `caller_id` owns this resource.
    fn ensure_owned_by(&self, caller_id: DbId) -> Result<(), CoreError> {
        if self.is_owned_by(caller_id) {
            Ok(())
        } else {
            Err(CoreError::NotOwner {
                entity: Self::ENTITY,
                id: self.id(),
            })
        }
    }
}

/// Turn a store lookup into the resource or [`CoreError::NotFound`].
pub fn require_found<T: Owned>(found: Option<T>, id: DbId) -> Result<T, CoreError> {
    found.ok_or(CoreError::NotFound {
        entity: T::ENTITY,
        id,
    })
}

/// Load-then-check helper: the resource must exist and belong to `caller_id`.
pub fn require_owned<T: Owned>(found: Option<T>, id: DbId, caller_id: DbId) -> Result<T, CoreError> {
    let resource = require_found(found, id)?;
    resource.ensure_owned_by(caller_id)?;
    Ok(resource)
}

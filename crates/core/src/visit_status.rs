//! Cafe listing visit status and its input normalization rule.
//!
//! A listing starts as [`VisitStatus::ToVisit`]. Only its owner moves it to
//! [`VisitStatus::Visited`], and ratings can be created only once it is there.
//! Nothing in the rating flow writes this field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Canonical wire/database value for [`VisitStatus::ToVisit`].
pub const VISIT_STATUS_TO_VISIT: &str = "to_visit";

/// Canonical wire/database value for [`VisitStatus::Visited`].
pub const VISIT_STATUS_VISITED: &str = "visited";

/// Two-state visit status of a cafe listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    ToVisit,
    Visited,
}

impl VisitStatus {
    /// The canonical lowercase string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            VisitStatus::ToVisit => VISIT_STATUS_TO_VISIT,
            VisitStatus::Visited => VISIT_STATUS_VISITED,
        }
    }

    pub fn is_visited(self) -> bool {
        self == VisitStatus::Visited
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse of an already-canonical value (e.g. a database column).
impl FromStr for VisitStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            VISIT_STATUS_TO_VISIT => Ok(VisitStatus::ToVisit),
            VISIT_STATUS_VISITED => Ok(VisitStatus::Visited),
            other => Err(CoreError::InvalidVisitStatus(other.to_string())),
        }
    }
}

/// Normalize user-supplied visit status input.
///
/// Input is trimmed and lowercased. Empty input defaults to `to_visit`; any
/// other value must match one of the canonical values exactly, otherwise
/// [`CoreError::InvalidVisitStatus`] is returned. Unknown values are never
/// coerced.
pub fn normalize_visit_status(input: Option<&str>) -> Result<VisitStatus, CoreError> {
    let raw = input.unwrap_or_default();
    let status = raw.trim().to_lowercase();
    if status.is_empty() {
        return Ok(VisitStatus::ToVisit);
    }
    status
        .parse()
        .map_err(|_| CoreError::InvalidVisitStatus(raw.to_string()))
}

/// Normalize an optional list filter.
///
/// Absent or blank input means "no filter"; anything else follows
/// [`normalize_visit_status`].
pub fn normalize_visit_status_filter(
    input: Option<&str>,
) -> Result<Option<VisitStatus>, CoreError> {
    match input {
        Some(raw) if !raw.trim().is_empty() => normalize_visit_status(Some(raw)).map(Some),
        _ => Ok(None),
    }
}

//! Case record types and identifiers.

use super::CaseStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a case record.
///
/// Deserializes from either a string or a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Creates a new case ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CaseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CaseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for CaseId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self(s),
            Repr::Number(n) => Self(n.to_string()),
        })
    }
}

/// A missing-person case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Unique identifier.
    pub id: CaseId,
    /// Full name of the missing person.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Date the person was last seen.
    pub last_seen: NaiveDate,
    /// Where the person was last seen.
    #[serde(default)]
    pub location: String,
    /// Photo reference (URI or path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Explicit status. `None` is displayed and filtered as active.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::status::deserialize_lenient_status"
    )]
    pub status: Option<CaseStatus>,
}

impl CaseRecord {
    /// Creates a record with empty location, description, photo and status.
    #[must_use]
    pub fn new(
        id: impl Into<CaseId>,
        name: impl Into<String>,
        age: u32,
        last_seen: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            last_seen,
            location: String::new(),
            photo: None,
            description: String::new(),
            status: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the photo reference.
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the status with unset normalized to [`CaseStatus::Active`].
    #[must_use]
    pub fn effective_status(&self) -> CaseStatus {
        self.status.unwrap_or_default()
    }
}

//! Case status and gender types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status of a missing-person case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Open case with no special flag. Records without a status are active.
    #[default]
    Active,
    /// Needs immediate attention.
    Urgent,
    /// Recently reported.
    Recent,
    /// Person has been found.
    Found,
}

impl CaseStatus {
    /// Returns all status variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Urgent, Self::Recent, Self::Active, Self::Found]
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Urgent => "urgent",
            Self::Recent => "recent",
            Self::Found => "found",
        }
    }

    /// Returns the badge label shown on case cards.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Urgent => "URGENT",
            Self::Recent => "RECENT",
            Self::Found => "FOUND",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "urgent" => Some(Self::Urgent),
            "recent" => Some(Self::Recent),
            "found" => Some(Self::Found),
            _ => None,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deserializes an optional status, treating blank or unknown values as unset.
///
/// Used for record files, where a single bad status should not reject the
/// whole collection.
pub(super) fn deserialize_lenient_status<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<CaseStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(lenient_status))
}

/// Parses a status from untyped input, logging unrecognized values.
pub fn lenient_status(raw: &str) -> Option<CaseStatus> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = CaseStatus::parse(trimmed);
    if parsed.is_none() {
        tracing::warn!(value = trimmed, "unrecognized case status, treating as unset");
    }
    parsed
}

/// Gender filter values.
///
/// Case records do not carry a gender yet, so this only exists on the
/// criteria side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Other,
}

impl Gender {
    /// Returns all gender variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Male, Self::Female, Self::Other]
    }

    /// Returns the gender as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parses a gender from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_active() {
        assert_eq!(CaseStatus::default(), CaseStatus::Active);
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in CaseStatus::all() {
            assert_eq!(CaseStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(CaseStatus::parse(" URGENT "), Some(CaseStatus::Urgent));
        assert_eq!(CaseStatus::parse("missing"), None);
    }

    #[test]
    fn test_lenient_status() {
        assert_eq!(lenient_status(""), None);
        assert_eq!(lenient_status("   "), None);
        assert_eq!(lenient_status("bogus"), None);
        assert_eq!(lenient_status("Found"), Some(CaseStatus::Found));
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("m"), Some(Gender::Male));
        assert_eq!(Gender::parse("unknown"), None);
    }
}

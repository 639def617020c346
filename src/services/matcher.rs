//! Record predicates.
//!
//! Two predicates decide whether a record is kept:
//!
//! | Predicate | Fields | Empty criterion |
//! |-----------|--------|-----------------|
//! | text match | name, location, description (OR) | matches all |
//! | structured match | location, age, elapsed time, status (AND) | dimension skipped |
//!
//! All string comparisons are case-insensitive substring checks with
//! surrounding whitespace ignored on the needle.

use crate::models::{CaseRecord, FilterCriteria};
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// Criteria prepared for repeated matching.
///
/// Lowercases the query and location needles once instead of per record.
#[derive(Debug)]
pub struct Matcher<'c> {
    criteria: &'c FilterCriteria,
    query: Option<String>,
    location: Option<String>,
    now: DateTime<Utc>,
}

impl<'c> Matcher<'c> {
    /// Prepares `criteria` for matching at evaluation instant `now`.
    #[must_use]
    pub fn new(criteria: &'c FilterCriteria, now: DateTime<Utc>) -> Self {
        Self {
            criteria,
            query: normalize(&criteria.query),
            location: normalize(&criteria.location),
            now,
        }
    }

    /// Returns true if the record passes both predicates.
    #[must_use]
    pub fn matches(&self, record: &CaseRecord) -> bool {
        self.matches_text(record) && self.matches_structured(record)
    }

    /// Free-text predicate.
    #[must_use]
    pub fn matches_text(&self, record: &CaseRecord) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        [&record.name, &record.location, &record.description]
            .into_iter()
            .any(|field| contains_folded(field, query))
    }

    /// Structured predicate. Gender is not checked; records carry none.
    #[must_use]
    pub fn matches_structured(&self, record: &CaseRecord) -> bool {
        if let Some(location) = self.location.as_deref()
            && !contains_folded(&record.location, location)
        {
            return false;
        }

        if let Some(bracket) = self.criteria.age_range
            && !bracket.contains(record.age)
        {
            return false;
        }

        if let Some(bracket) = self.criteria.date_range
            && !bracket.contains(elapsed_since(record, self.now))
        {
            return false;
        }

        if let Some(status) = self.criteria.status
            && record.effective_status() != status
        {
            return false;
        }

        true
    }
}

/// Returns true if `record` satisfies the free-text `query`.
///
/// A blank query matches every record.
#[must_use]
pub fn text_matches(query: &str, record: &CaseRecord) -> bool {
    normalize(query).is_none_or(|needle| {
        [&record.name, &record.location, &record.description]
            .into_iter()
            .any(|field| contains_folded(field, &needle))
    })
}

/// Returns true if `record` satisfies the structured part of `criteria`.
#[must_use]
pub fn structured_matches(
    criteria: &FilterCriteria,
    record: &CaseRecord,
    now: DateTime<Utc>,
) -> bool {
    Matcher::new(criteria, now).matches_structured(record)
}

/// Time between the record's last-seen date (midnight UTC) and `now`.
#[must_use]
pub fn elapsed_since(record: &CaseRecord, now: DateTime<Utc>) -> TimeDelta {
    now - record.last_seen.and_time(NaiveTime::MIN).and_utc()
}

/// Trims and lowercases a needle; `None` when blank.
fn normalize(needle: &str) -> Option<String> {
    let trimmed = needle.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

//! Filter criteria and bracket types.
//!
//! [`FilterCriteria`] is the typed criteria snapshot passed to the evaluator.
//! [`RawCriteria`] is its untyped counterpart for values arriving as plain
//! strings (deserialized input, CLI flags, the filter-query parser). Only the
//! raw form degrades unrecognized tokens to "unconstrained".

use super::{CaseStatus, Gender, status::lenient_status};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age bracket filter values (inclusive ranges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    /// 0 to 12 years.
    #[serde(rename = "0-12")]
    Child,
    /// 13 to 17 years.
    #[serde(rename = "13-17")]
    Teen,
    /// 18 to 30 years.
    #[serde(rename = "18-30")]
    YoungAdult,
    /// 31 to 50 years.
    #[serde(rename = "31-50")]
    Adult,
    /// 51 years and older.
    #[serde(rename = "51+")]
    Senior,
}

impl AgeBracket {
    /// Returns all brackets in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Child,
            Self::Teen,
            Self::YoungAdult,
            Self::Adult,
            Self::Senior,
        ]
    }

    /// Returns the bracket token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "0-12",
            Self::Teen => "13-17",
            Self::YoungAdult => "18-30",
            Self::Adult => "31-50",
            Self::Senior => "51+",
        }
    }

    /// Returns the inclusive bounds. `None` as upper bound means unbounded.
    #[must_use]
    pub const fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            Self::Child => (0, Some(12)),
            Self::Teen => (13, Some(17)),
            Self::YoungAdult => (18, Some(30)),
            Self::Adult => (31, Some(50)),
            Self::Senior => (51, None),
        }
    }

    /// Returns true if `age` falls inside the bracket.
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        let (min, max) = self.bounds();
        match max {
            Some(max) => age >= min && age <= max,
            None => age >= min,
        }
    }

    /// Parses a bracket token such as `18-30` or `51+`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0-12" => Some(Self::Child),
            "13-17" => Some(Self::Teen),
            "18-30" => Some(Self::YoungAdult),
            "31-50" => Some(Self::Adult),
            "51+" => Some(Self::Senior),
            _ => None,
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Elapsed-time bracket: how long ago the person was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElapsedBracket {
    /// Within the last day.
    Today,
    /// Within the last 7 days.
    Week,
    /// Within the last 30 days.
    Month,
    /// Within the last 90 days.
    Quarter,
    /// Within the last 365 days.
    Year,
}

impl ElapsedBracket {
    /// Returns all brackets from narrowest to widest.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Today, Self::Week, Self::Month, Self::Quarter, Self::Year]
    }

    /// Returns the bracket token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Returns the inclusive upper bound in days.
    #[must_use]
    pub const fn max_days(&self) -> i64 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Returns true if `elapsed` is within the bracket.
    ///
    /// Negative durations (last seen in the future) are within every bracket.
    #[must_use]
    pub fn contains(&self, elapsed: TimeDelta) -> bool {
        elapsed <= TimeDelta::days(self.max_days())
    }

    /// Parses a bracket token. Also accepts `1d`, `7d`, `30d`, `90d`, `365d`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "today" | "1d" => Some(Self::Today),
            "week" | "7d" => Some(Self::Week),
            "month" | "30d" => Some(Self::Month),
            "quarter" | "90d" => Some(Self::Quarter),
            "year" | "365d" => Some(Self::Year),
            _ => None,
        }
    }
}

impl fmt::Display for ElapsedBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed criteria snapshot for one evaluation.
///
/// Every field left empty imposes no constraint, so [`FilterCriteria::new`]
/// matches all records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text query over name, location and description.
    pub query: String,
    /// Location substring.
    pub location: String,
    /// Age bracket.
    pub age_range: Option<AgeBracket>,
    /// Elapsed-time bracket.
    pub date_range: Option<ElapsedBracket>,
    /// Case status.
    pub status: Option<CaseStatus>,
    /// Gender. Held for future use; records carry no gender yet.
    pub gender: Option<Gender>,
}

impl FilterCriteria {
    /// Creates empty criteria (matches all).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            age_range: None,
            date_range: None,
            status: None,
            gender: None,
        }
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the location substring.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the age bracket.
    #[must_use]
    pub const fn with_age_range(mut self, bracket: AgeBracket) -> Self {
        self.age_range = Some(bracket);
        self
    }

    /// Sets the elapsed-time bracket.
    #[must_use]
    pub const fn with_date_range(mut self, bracket: ElapsedBracket) -> Self {
        self.date_range = Some(bracket);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the gender.
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Resets every field to unconstrained.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns true if the query has non-blank text.
    #[must_use]
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Number of structured filters in use. The free-text query is not counted.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        [
            !self.location.trim().is_empty(),
            self.age_range.is_some(),
            self.date_range.is_some(),
            self.status.is_some(),
            self.gender.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Returns true if nothing is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_query() && self.active_filter_count() == 0
    }

    /// Overlays the non-empty fields of `other` onto `self`.
    #[must_use]
    pub fn merged_with(mut self, other: &Self) -> Self {
        if other.has_query() {
            self.query.clone_from(&other.query);
        }
        if !other.location.trim().is_empty() {
            self.location.clone_from(&other.location);
        }
        self.age_range = other.age_range.or(self.age_range);
        self.date_range = other.date_range.or(self.date_range);
        self.status = other.status.or(self.status);
        self.gender = other.gender.or(self.gender);
        self
    }
}

/// Untyped criteria, as received from forms, flags, or deserialized input.
///
/// Every field is a plain string; an empty string means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCriteria {
    /// Free-text query.
    pub query: String,
    /// Location substring.
    pub location: String,
    /// Age bracket token.
    pub age_range: String,
    /// Elapsed-time bracket token.
    pub date_range: String,
    /// Status token.
    pub status: String,
    /// Gender token.
    pub gender: String,
}

impl RawCriteria {
    /// Converts to typed criteria.
    ///
    /// Unrecognized tokens leave their dimension unconstrained and are logged.
    #[must_use]
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            age_range: lenient("ageRange", &self.age_range, AgeBracket::parse),
            date_range: lenient("dateRange", &self.date_range, ElapsedBracket::parse),
            status: lenient_status(&self.status),
            gender: lenient("gender", &self.gender, Gender::parse),
            query: self.query,
            location: self.location,
        }
    }
}

impl From<RawCriteria> for FilterCriteria {
    fn from(raw: RawCriteria) -> Self {
        raw.into_criteria()
    }
}

fn lenient<T>(field: &'static str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse(trimmed);
    if parsed.is_none() {
        tracing::warn!(
            field,
            value = trimmed,
            "unrecognized filter value, leaving dimension unconstrained"
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, Some(AgeBracket::Child); "newborn")]
    #[test_case(12, Some(AgeBracket::Child); "child upper bound")]
    #[test_case(13, Some(AgeBracket::Teen); "teen lower bound")]
    #[test_case(17, Some(AgeBracket::Teen); "teen upper bound")]
    #[test_case(18, Some(AgeBracket::YoungAdult); "young adult lower bound")]
    #[test_case(30, Some(AgeBracket::YoungAdult); "young adult upper bound")]
    #[test_case(31, Some(AgeBracket::Adult); "adult lower bound")]
    #[test_case(50, Some(AgeBracket::Adult); "adult upper bound")]
    #[test_case(51, Some(AgeBracket::Senior); "senior lower bound")]
    #[test_case(120, Some(AgeBracket::Senior); "senior open ended")]
    fn test_age_bracket_membership(age: u32, expected: Option<AgeBracket>) {
        let found: Vec<_> = AgeBracket::all()
            .iter()
            .copied()
            .filter(|b| b.contains(age))
            .collect();
        assert_eq!(found.first().copied(), expected);
        assert_eq!(found.len(), 1, "age {age} should fall in exactly one bracket");
    }

    #[test]
    fn test_age_bracket_parse_roundtrip() {
        for bracket in AgeBracket::all() {
            assert_eq!(AgeBracket::parse(bracket.as_str()), Some(*bracket));
        }
        assert_eq!(AgeBracket::parse("18-31"), None);
    }

    #[test_case(ElapsedBracket::Today, 1, true; "today at bound")]
    #[test_case(ElapsedBracket::Today, 2, false; "today past bound")]
    #[test_case(ElapsedBracket::Week, 7, true; "week at bound")]
    #[test_case(ElapsedBracket::Week, 8, false; "week past bound")]
    #[test_case(ElapsedBracket::Month, 30, true; "month at bound")]
    #[test_case(ElapsedBracket::Quarter, 91, false; "quarter past bound")]
    #[test_case(ElapsedBracket::Year, 365, true; "year at bound")]
    #[test_case(ElapsedBracket::Year, -3, true; "future date")]
    fn test_elapsed_bracket_contains(bracket: ElapsedBracket, days: i64, expected: bool) {
        assert_eq!(bracket.contains(TimeDelta::days(days)), expected);
    }

    #[test]
    fn test_elapsed_bracket_partial_day() {
        let just_over = TimeDelta::days(1) + TimeDelta::seconds(1);
        assert!(!ElapsedBracket::Today.contains(just_over));
        assert!(ElapsedBracket::Week.contains(just_over));
    }

    #[test]
    fn test_elapsed_bracket_aliases() {
        assert_eq!(ElapsedBracket::parse("7d"), Some(ElapsedBracket::Week));
        assert_eq!(ElapsedBracket::parse("QUARTER"), Some(ElapsedBracket::Quarter));
        assert_eq!(ElapsedBracket::parse("decade"), None);
    }

    #[test]
    fn test_new_criteria_is_empty() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let criteria = FilterCriteria::new().with_query("   ");
        assert!(!criteria.has_query());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_active_filter_count_excludes_query() {
        let criteria = FilterCriteria::new()
            .with_query("maria")
            .with_location("SP")
            .with_status(CaseStatus::Urgent)
            .with_gender(Gender::Female);
        assert_eq!(criteria.active_filter_count(), 3);
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut criteria = FilterCriteria::new()
            .with_query("joão")
            .with_age_range(AgeBracket::Adult)
            .with_date_range(ElapsedBracket::Week);
        criteria.clear();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_merged_with_prefers_other() {
        let base = FilterCriteria::new()
            .with_status(CaseStatus::Recent)
            .with_location("SP");
        let overlay = FilterCriteria::new().with_status(CaseStatus::Urgent);
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.status, Some(CaseStatus::Urgent));
        assert_eq!(merged.location, "SP");
    }

    #[test]
    fn test_raw_criteria_permissive() {
        let raw = RawCriteria {
            query: "maria".to_string(),
            age_range: "99-100".to_string(),
            date_range: "week".to_string(),
            status: "missing".to_string(),
            gender: "female".to_string(),
            ..RawCriteria::default()
        };
        let criteria = raw.into_criteria();
        assert_eq!(criteria.query, "maria");
        assert_eq!(criteria.age_range, None);
        assert_eq!(criteria.date_range, Some(ElapsedBracket::Week));
        assert_eq!(criteria.status, None);
        assert_eq!(criteria.gender, Some(Gender::Female));
    }

    #[test]
    fn test_raw_criteria_deserializes_form_shape() {
        let json = r#"{"location": "", "ageRange": "0-12", "dateRange": "", "status": "urgent", "gender": ""}"#;
        let raw: RawCriteria = serde_json::from_str(json).unwrap();
        let criteria = FilterCriteria::from(raw);
        assert_eq!(criteria.age_range, Some(AgeBracket::Child));
        assert_eq!(criteria.status, Some(CaseStatus::Urgent));
        assert!(criteria.query.is_empty());
        assert_eq!(criteria.active_filter_count(), 2);
    }
}

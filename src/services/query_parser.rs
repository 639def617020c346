//! Filter query parser for case search.
//!
//! Parses GitHub-style filter syntax like:
//! - `status:urgent` - Filter by status
//! - `age:18-30` - Filter by age bracket
//! - `since:week` - Filter by time since last seen
//! - `loc:"São Paulo"` - Filter by location substring
//! - `gender:female` - Filter by gender
//!
//! Anything else is free text searched in name, location and description.

use crate::models::{FilterCriteria, RawCriteria};
use once_cell::sync::Lazy;
use regex::Regex;

/// Splits a query into `key:"quoted value"`, `"quoted phrase"`, or bare tokens.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[^\s":]+:"[^"]*"|"[^"]*"|\S+"#).unwrap_or_else(|_| unreachable!())
});

/// Parses a filter query string into `FilterCriteria`.
///
/// # Arguments
///
/// * `query` - The filter query string (e.g., "maria status:recent age:18-30")
///
/// # Returns
///
/// A `FilterCriteria` populated with the parsed criteria. Unrecognized
/// values for known keys leave that dimension unconstrained.
///
/// # Examples
///
/// ```
/// use casefinder::models::{AgeBracket, CaseStatus};
/// use casefinder::services::parse_filter_query;
///
/// let criteria = parse_filter_query(r#"maria status:recent age:18-30 loc:"São Paulo""#);
/// assert_eq!(criteria.query, "maria");
/// assert_eq!(criteria.status, Some(CaseStatus::Recent));
/// assert_eq!(criteria.age_range, Some(AgeBracket::YoungAdult));
/// assert_eq!(criteria.location, "São Paulo");
/// ```
#[must_use]
pub fn parse_filter_query(query: &str) -> FilterCriteria {
    parse_raw_query(query).into_criteria()
}

/// Parses a filter query string without interpreting bracket tokens.
#[must_use]
pub fn parse_raw_query(query: &str) -> RawCriteria {
    let mut raw = RawCriteria::default();
    let mut words: Vec<&str> = Vec::new();

    for token in TOKEN_PATTERN.find_iter(query).map(|m| m.as_str()) {
        if !parse_token(token, &mut raw) {
            let word = unquote(token);
            if !word.is_empty() {
                words.push(word);
            }
        }
    }

    raw.query = words.join(" ");
    raw
}

/// Applies a `key:value` token. Returns false for free-text tokens,
/// including tokens whose key is not a filter key (`10:30`, `rua:azul`).
fn parse_token(token: &str, raw: &mut RawCriteria) -> bool {
    if token.starts_with('"') {
        return false;
    }

    let Some((key, value)) = token.split_once(':') else {
        return false;
    };
    let value = unquote(value).to_string();

    match key.to_lowercase().as_str() {
        "loc" | "location" => raw.location = value,
        "age" => raw.age_range = value,
        "since" | "date" => raw.date_range = value,
        "status" => raw.status = value,
        "gender" => raw.gender = value,
        _ => return false,
    }
    true
}

fn unquote(s: &str) -> &str {
    s.trim_matches('"').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, CaseStatus, ElapsedBracket, Gender};

    #[test]
    fn test_parse_empty_query() {
        let criteria = parse_filter_query("");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_parse_free_text() {
        let criteria = parse_filter_query("maria silva");
        assert_eq!(criteria.query, "maria silva");
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn test_parse_status() {
        let criteria = parse_filter_query("status:urgent");
        assert_eq!(criteria.status, Some(CaseStatus::Urgent));
        assert!(criteria.query.is_empty());
    }

    #[test]
    fn test_parse_age() {
        let criteria = parse_filter_query("age:51+");
        assert_eq!(criteria.age_range, Some(AgeBracket::Senior));
    }

    #[test]
    fn test_parse_since_aliases() {
        assert_eq!(
            parse_filter_query("since:month").date_range,
            Some(ElapsedBracket::Month)
        );
        assert_eq!(
            parse_filter_query("date:7d").date_range,
            Some(ElapsedBracket::Week)
        );
    }

    #[test]
    fn test_parse_quoted_location() {
        let criteria = parse_filter_query(r#"loc:"Rio de Janeiro" status:urgent"#);
        assert_eq!(criteria.location, "Rio de Janeiro");
        assert_eq!(criteria.status, Some(CaseStatus::Urgent));
    }

    #[test]
    fn test_parse_quoted_phrase_is_free_text() {
        let criteria = parse_filter_query(r#""blusa azul" gender:female"#);
        assert_eq!(criteria.query, "blusa azul");
        assert_eq!(criteria.gender, Some(Gender::Female));
    }

    #[test]
    fn test_parse_unknown_value_unconstrained() {
        let criteria = parse_filter_query("age:forty status:lost maria");
        assert_eq!(criteria.age_range, None);
        assert_eq!(criteria.status, None);
        assert_eq!(criteria.query, "maria");
    }

    #[test]
    fn test_parse_unknown_key_is_free_text() {
        let criteria = parse_filter_query("color:blue maria");
        assert_eq!(criteria.query, "color:blue maria");
        assert!(criteria.location.is_empty());
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn test_parse_colon_text_kept() {
        assert_eq!(parse_filter_query("10:30 maria").query, "10:30 maria");

        let criteria = parse_filter_query("rua:azul");
        assert_eq!(criteria.query, "rua:azul");
        assert!(criteria.location.is_empty());
    }

    #[test]
    fn test_parse_later_token_wins() {
        let criteria = parse_filter_query("status:urgent status:found");
        assert_eq!(criteria.status, Some(CaseStatus::Found));
    }

    #[test]
    fn test_parse_case_insensitive_keys() {
        let criteria = parse_filter_query("STATUS:Recent LOC:SP");
        assert_eq!(criteria.status, Some(CaseStatus::Recent));
        assert_eq!(criteria.location, "SP");
    }

    #[test]
    fn test_parse_unclosed_quote() {
        let criteria = parse_filter_query(r#"loc:"São"#);
        assert_eq!(criteria.location, "São");
    }

    #[test]
    fn test_parse_complex_query() {
        let criteria = parse_filter_query(
            r#"não retornou loc:"Porto Alegre" age:31-50 since:year status:urgent"#,
        );
        assert_eq!(criteria.query, "não retornou");
        assert_eq!(criteria.location, "Porto Alegre");
        assert_eq!(criteria.age_range, Some(AgeBracket::Adult));
        assert_eq!(criteria.date_range, Some(ElapsedBracket::Year));
        assert_eq!(criteria.status, Some(CaseStatus::Urgent));
    }
}

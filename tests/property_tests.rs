//! Property-based tests for case evaluation.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Empty criteria return the input unchanged
//! - An empty query contributes no filtering
//! - Query matching ignores case
//! - Results are an order-preserving subsequence of the input
//! - Evaluation is deterministic
//! - Age brackets partition all ages
//! - The filter query parser accepts any input

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use casefinder::services::structured_matches;
use casefinder::{
    AgeBracket, CaseRecord, CaseStatus, ElapsedBracket, FilterCriteria, evaluate,
    parse_filter_query,
};
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0).unwrap()
}

fn arb_status() -> impl Strategy<Value = Option<CaseStatus>> {
    prop::option::of(prop::sample::select(CaseStatus::all().to_vec()))
}

fn arb_record() -> impl Strategy<Value = CaseRecord> {
    (
        "[0-9]{1,4}",
        "[A-Za-z ]{0,16}",
        0u32..110,
        -30i64..800,
        "[A-Za-z ,]{0,20}",
        "[A-Za-z ]{0,30}",
        arb_status(),
    )
        .prop_map(|(id, name, age, days_ago, location, description, status)| {
            let last_seen = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap() - TimeDelta::days(days_ago);
            let mut record = CaseRecord::new(id, name, age, last_seen)
                .with_location(location)
                .with_description(description);
            record.status = status;
            record
        })
}

fn arb_records() -> impl Strategy<Value = Vec<CaseRecord>> {
    prop::collection::vec(arb_record(), 0..24)
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        "[A-Za-z]{0,3}",
        "[A-Za-z]{0,2}",
        prop::option::of(prop::sample::select(AgeBracket::all().to_vec())),
        prop::option::of(prop::sample::select(ElapsedBracket::all().to_vec())),
        arb_status(),
    )
        .prop_map(|(query, location, age_range, date_range, status)| FilterCriteria {
            query,
            location,
            age_range,
            date_range,
            status,
            ..FilterCriteria::default()
        })
}

proptest! {
    /// Property: empty criteria keep every record, in order.
    #[test]
    fn prop_empty_criteria_is_identity(records in arb_records()) {
        let hits = evaluate(&records, &FilterCriteria::new(), now());
        prop_assert_eq!(hits, records.iter().collect::<Vec<_>>());
    }

    /// Property: with no query, only the structured predicate decides.
    #[test]
    fn prop_empty_query_is_structured_only(
        records in arb_records(),
        criteria in arb_criteria(),
        blank in "[ \t]{0,3}",
    ) {
        let criteria = FilterCriteria { query: blank, ..criteria };
        let hits = evaluate(&records, &criteria, now());
        let expected: Vec<&CaseRecord> = records
            .iter()
            .filter(|r| structured_matches(&criteria, r, now()))
            .collect();
        prop_assert_eq!(hits, expected);
    }

    /// Property: upper- and lower-case ASCII queries select the same records.
    #[test]
    fn prop_query_case_insensitive(records in arb_records(), query in "[a-z]{1,3}") {
        let lower = FilterCriteria::new().with_query(query.clone());
        let upper = FilterCriteria::new().with_query(query.to_uppercase());
        prop_assert_eq!(
            evaluate(&records, &lower, now()),
            evaluate(&records, &upper, now())
        );
    }

    /// Property: hits appear in input order and are drawn from the input.
    #[test]
    fn prop_result_is_ordered_subsequence(
        records in arb_records(),
        criteria in arb_criteria(),
    ) {
        let hits = evaluate(&records, &criteria, now());
        let mut last = None;
        for hit in hits {
            let pos = records.iter().position(|r| std::ptr::eq(r, hit));
            prop_assert!(pos.is_some());
            prop_assert!(last < pos);
            last = pos;
        }
    }

    /// Property: evaluating twice gives the same answer.
    #[test]
    fn prop_evaluation_is_deterministic(
        records in arb_records(),
        criteria in arb_criteria(),
    ) {
        prop_assert_eq!(
            evaluate(&records, &criteria, now()),
            evaluate(&records, &criteria, now())
        );
    }

    /// Property: every age falls in exactly one bracket.
    #[test]
    fn prop_age_brackets_partition(age in 0u32..200) {
        let count = AgeBracket::all().iter().filter(|b| b.contains(age)).count();
        prop_assert_eq!(count, 1);
    }

    /// Property: a last-seen date in the future matches every elapsed bracket.
    #[test]
    fn prop_future_dates_match_all_brackets(days_ahead in 1i64..400) {
        for bracket in ElapsedBracket::all() {
            prop_assert!(bracket.contains(TimeDelta::days(-days_ahead)));
        }
    }

    /// Property: the parser accepts any input.
    #[test]
    fn prop_parser_accepts_anything(input in "\\PC{0,64}") {
        let criteria = parse_filter_query(&input);
        prop_assert!(criteria.active_filter_count() <= 5);
    }

    /// Property: adding a location constraint never adds records.
    #[test]
    fn prop_location_narrowing_never_grows_results(
        records in arb_records(),
        criteria in arb_criteria(),
        location in "[A-Za-z]{1,2}",
    ) {
        let base = FilterCriteria { location: String::new(), ..criteria };
        let base_hits = evaluate(&records, &base, now());
        let narrowed = base.clone().with_location(location);
        let narrowed_hits = evaluate(&records, &narrowed, now());
        prop_assert!(narrowed_hits.len() <= base_hits.len());
        for hit in narrowed_hits {
            prop_assert!(base_hits.iter().any(|b| std::ptr::eq(*b, hit)));
        }
    }
}

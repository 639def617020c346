//! Query evaluation over an in-memory case collection.

use super::clock::{Clock, SystemClock};
use super::matcher::Matcher;
use crate::models::{CaseRecord, FilterCriteria, SearchResult};
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::instrument;

/// Returns the records matching `criteria`, in input order.
///
/// A record is kept when it satisfies both the free-text query and every
/// non-empty structured criterion. Duplicates are preserved and nothing is
/// re-sorted. `now` is the instant elapsed-time brackets are measured from.
///
/// # Examples
///
/// ```
/// use casefinder::models::{CaseStatus, FilterCriteria, sample_cases};
/// use casefinder::services::evaluate;
///
/// let cases = sample_cases();
/// let criteria = FilterCriteria::new().with_status(CaseStatus::Urgent);
/// let hits = evaluate(&cases, &criteria, chrono::Utc::now());
/// assert!(hits.iter().all(|c| c.effective_status() == CaseStatus::Urgent));
/// ```
#[must_use]
pub fn evaluate<'a>(
    records: &'a [CaseRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a CaseRecord> {
    let matcher = Matcher::new(criteria, now);
    records.iter().filter(|r| matcher.matches(r)).collect()
}

/// Returns criteria with every field unconstrained.
#[must_use]
pub const fn clear_criteria() -> FilterCriteria {
    FilterCriteria::new()
}

/// Runs searches against a clock.
///
/// Holds no per-query state; one service can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct SearchService<C: Clock = SystemClock> {
    clock: C,
}

impl SearchService<SystemClock> {
    /// Creates a service that measures elapsed time from the wall clock.
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> SearchService<C> {
    /// Creates a service with a custom clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Returns the clock's current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Evaluates `criteria` against `records` and collects owned results.
    #[instrument(
        skip(self, records, criteria),
        fields(
            records = records.len(),
            has_query = criteria.has_query(),
            filters = criteria.active_filter_count()
        )
    )]
    pub fn search(&self, records: &[CaseRecord], criteria: &FilterCriteria) -> SearchResult {
        let start = Instant::now();
        let now = self.clock.now();

        let cases: Vec<CaseRecord> = evaluate(records, criteria, now)
            .into_iter()
            .cloned()
            .collect();

        let elapsed = start.elapsed();
        let execution_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let matched = u64::try_from(cases.len()).unwrap_or(u64::MAX);

        metrics::counter!("casefinder_searches_total").increment(1);
        metrics::counter!("casefinder_search_matches_total").increment(matched);
        metrics::histogram!("casefinder_search_duration_ms").record(elapsed.as_secs_f64() * 1000.0);

        tracing::debug!(matched, execution_time_ms, "search completed");

        SearchResult {
            cases,
            scanned: records.len(),
            execution_time_ms,
        }
    }
}

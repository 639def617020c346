//! Search result types.

use super::CaseRecord;
use serde::Serialize;

/// Result of a search run through [`crate::services::SearchService`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Matching cases, in input order.
    pub cases: Vec<CaseRecord>,
    /// Number of records evaluated.
    pub scanned: usize,
    /// Search execution time in milliseconds.
    pub execution_time_ms: u64,
}

impl SearchResult {
    /// Number of matching cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

//! Data models for casefinder.
//!
//! Case records, filter criteria and search results.

mod criteria;
mod record;
mod sample;
mod search;
mod status;

pub use criteria::{AgeBracket, ElapsedBracket, FilterCriteria, RawCriteria};
pub use record::{CaseId, CaseRecord};
pub use sample::sample_cases;
pub use search::SearchResult;
pub use status::{CaseStatus, Gender};

pub(crate) use status::lenient_status;

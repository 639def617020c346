//! Search services.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `matcher` | Text and structured record predicates |
//! | `search` | Order-preserving evaluation and [`SearchService`] |
//! | `clock` | Injectable evaluation instant |
//! | `query_parser` | `key:value` filter query syntax |

mod clock;
mod matcher;
mod query_parser;
mod search;

pub use clock::{Clock, FixedClock, SystemClock};
pub use matcher::{Matcher, elapsed_since, structured_matches, text_matches};
pub use query_parser::{parse_filter_query, parse_raw_query};
pub use search::{SearchService, clear_criteria, evaluate};

//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Filter case records by query and structured filters |
//! | `brackets` | List accepted filter values |
//! | `config` | Show effective configuration |
//! | `completions` | Print a shell completion script |
//!
//! # Example Usage
//!
//! ```bash
//! # Free text plus inline filters
//! casefinder search maria status:recent
//!
//! # Explicit flags override inline filters
//! casefinder search -r cases.csv -a 18-30 -d 7d -f cards
//! ```

mod brackets;
mod config;
mod search;

pub use brackets::{
    BracketInfo, BracketsOutputFormat, cmd_brackets, get_all_brackets, write_json, write_table,
    write_yaml,
};
pub use config::cmd_config;
pub use search::{OutputFormat, SearchArgs, cmd_search, parse_now, run_search};

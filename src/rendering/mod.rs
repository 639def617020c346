//! Plain-text rendering of case records.
//!
//! Two layouts, mirroring the grid and list views of the case browser:
//! a compact table and one card per case.

use crate::models::CaseRecord;
use crate::services::elapsed_since;
use chrono::{DateTime, NaiveDate, Utc};
use std::io::{self, Write};

const NAME_WIDTH: usize = 24;
const LOCATION_WIDTH: usize = 28;

/// Formats a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Whole days between the last-seen date and `now`, floored at zero.
#[must_use]
pub fn days_missing(record: &CaseRecord, now: DateTime<Utc>) -> i64 {
    elapsed_since(record, now).num_days().max(0)
}

/// Writes cases as an aligned table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_table<W: Write>(writer: &mut W, cases: &[CaseRecord]) -> io::Result<()> {
    writeln!(
        writer,
        "{:<6}{:<w$}{:>4}  {:<12}{:<8}LOCATION",
        "ID",
        "NAME",
        "AGE",
        "LAST SEEN",
        "STATUS",
        w = NAME_WIDTH
    )?;
    for case in cases {
        writeln!(
            writer,
            "{:<6}{:<w$}{:>4}  {:<12}{:<8}{}",
            truncate(case.id.as_str(), 5),
            truncate(&case.name, NAME_WIDTH - 1),
            case.age,
            format_date(case.last_seen),
            case.effective_status().as_str(),
            truncate(&case.location, LOCATION_WIDTH),
            w = NAME_WIDTH
        )?;
    }
    Ok(())
}

/// Writes one card per case.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_cards<W: Write>(
    writer: &mut W,
    cases: &[CaseRecord],
    now: DateTime<Utc>,
) -> io::Result<()> {
    for (i, case) in cases.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "[{}] {}", case.effective_status().label(), case.name)?;
        writeln!(writer, "  Age:       {}", case.age)?;
        writeln!(
            writer,
            "  Last seen: {} ({} days ago)",
            format_date(case.last_seen),
            days_missing(case, now)
        )?;
        if !case.location.is_empty() {
            writeln!(writer, "  Location:  {}", case.location)?;
        }
        if let Some(photo) = &case.photo {
            writeln!(writer, "  Photo:     {photo}")?;
        }
        if !case.description.is_empty() {
            writeln!(writer, "  {}", case.description)?;
        }
    }
    Ok(())
}

/// Truncates to `max` characters, marking the cut with `~`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

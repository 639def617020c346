//! Search CLI command.

use crate::config::CasefinderConfig;
use crate::io::{RecordFormat, load_records, write_records};
use crate::models::{CaseRecord, FilterCriteria, SearchResult, sample_cases};
use crate::rendering::{write_cards, write_table};
use crate::services::{Clock, FixedClock, SearchService, SystemClock, parse_raw_query};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for `casefinder search`.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Free text and `key:value` filters (e.g. `maria status:recent`).
    pub query: Vec<String>,

    /// Records file (JSON, YAML or CSV).
    #[arg(short, long, conflicts_with = "sample")]
    pub records: Option<PathBuf>,

    /// Search the built-in sample cases.
    #[arg(long)]
    pub sample: bool,

    /// Location substring.
    #[arg(short, long)]
    pub location: Option<String>,

    /// Age bracket: 0-12, 13-17, 18-30, 31-50, 51+.
    #[arg(short, long)]
    pub age: Option<String>,

    /// Last seen within: today, week, month, quarter, year (or 1d, 7d, 30d, 90d, 365d).
    #[arg(short = 'd', long)]
    pub since: Option<String>,

    /// Case status: urgent, recent, active, found.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Gender: male, female, other.
    #[arg(short, long)]
    pub gender: Option<String>,

    /// Output format (defaults to the configured format).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Evaluate as of this instant (RFC 3339 or YYYY-MM-DD) instead of now.
    #[arg(long)]
    pub now: Option<String>,
}

impl SearchArgs {
    /// Builds criteria from the query words, then lets explicit flags
    /// override what the query set.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        let mut raw = parse_raw_query(&self.query.join(" "));
        overlay(&mut raw.location, self.location.as_ref());
        overlay(&mut raw.age_range, self.age.as_ref());
        overlay(&mut raw.date_range, self.since.as_ref());
        overlay(&mut raw.status, self.status.as_ref());
        overlay(&mut raw.gender, self.gender.as_ref());
        raw.into_criteria()
    }
}

fn overlay(field: &mut String, flag: Option<&String>) {
    if let Some(value) = flag {
        field.clone_from(value);
    }
}

/// Output format for the search command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table (default).
    #[default]
    Table,
    /// One card per case.
    #[value(alias = "card")]
    Cards,
    /// JSON array of records.
    Json,
    /// YAML sequence of records.
    #[value(alias = "yml")]
    Yaml,
    /// CSV with a header row.
    Csv,
}

impl OutputFormat {
    /// Parses a format name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known format.
    pub fn from_name(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).map_err(|_| {
            Error::InvalidInput(format!(
                "unknown output format '{name}' (expected table, cards, json, yaml, or csv)"
            ))
        })
    }

    const fn record_format(self) -> Option<RecordFormat> {
        match self {
            Self::Json => Some(RecordFormat::Json),
            Self::Yaml => Some(RecordFormat::Yaml),
            Self::Csv => Some(RecordFormat::Csv),
            Self::Table | Self::Cards => None,
        }
    }
}

/// Parses a `--now` value: RFC 3339, or a date taken as midnight UTC.
///
/// # Errors
///
/// Returns an error if the value is neither form.
pub fn parse_now(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            Error::InvalidInput(format!(
                "invalid --now value '{value}' (expected YYYY-MM-DD or RFC 3339)"
            ))
        })
}

/// Runs a search and writes the output.
///
/// # Errors
///
/// Returns an error if records cannot be loaded, `--now` is malformed, or
/// output cannot be written.
pub fn run_search<W: Write>(
    args: &SearchArgs,
    config: &CasefinderConfig,
    out: &mut W,
) -> Result<SearchResult> {
    let now = match args.now.as_deref() {
        Some(value) => parse_now(value)?,
        None => SystemClock.now(),
    };
    let criteria = args.criteria();
    let records = resolve_records(args, config)?;

    let service = SearchService::with_clock(FixedClock::new(now));
    let result = service.search(&records, &criteria);

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_name(&config.default_format)?,
    };

    if let Some(record_format) = format.record_format() {
        write_records(&mut *out, &result.cases, record_format)?;
        return Ok(result);
    }

    if format == OutputFormat::Cards {
        write_cards(out, &result.cases, now).map_err(output_error)?;
    } else {
        write_table(out, &result.cases).map_err(output_error)?;
    }
    write_summary(out, &result, &criteria).map_err(output_error)?;

    Ok(result)
}

/// Executes the search command against stdout.
///
/// # Errors
///
/// Returns an error if the search or output fails.
pub fn cmd_search(args: &SearchArgs, config: &CasefinderConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_search(args, config, &mut handle).map(|_| ())
}

/// Picks the records source: `--sample`, `--records`, the configured file,
/// then the sample cases.
fn resolve_records(args: &SearchArgs, config: &CasefinderConfig) -> Result<Vec<CaseRecord>> {
    if args.sample {
        return Ok(sample_cases());
    }
    match args.records.as_ref().or(config.records_path.as_ref()) {
        Some(path) => load_records(path),
        None => {
            tracing::info!("no records file configured, using sample cases");
            Ok(sample_cases())
        },
    }
}

fn write_summary<W: Write>(
    out: &mut W,
    result: &SearchResult,
    criteria: &FilterCriteria,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} result(s) found", result.len())?;
    let filters = criteria.active_filter_count();
    if filters > 0 {
        writeln!(out, "{filters} filter(s) applied")?;
    }
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn output_error(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}

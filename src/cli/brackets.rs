//! CLI command for listing accepted filter values.

use crate::models::{AgeBracket, CaseStatus, ElapsedBracket, Gender};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// One accepted value of a filter dimension.
#[derive(Debug, Clone, Serialize)]
pub struct BracketInfo {
    /// Filter dimension (`age`, `since`, `status`, `gender`).
    pub filter: String,
    /// Accepted token.
    pub value: String,
    /// Human-readable meaning.
    pub description: String,
}

impl BracketInfo {
    fn new(filter: &str, value: &str, description: impl Into<String>) -> Self {
        Self {
            filter: filter.to_string(),
            value: value.to_string(),
            description: description.into(),
        }
    }
}

/// Returns every accepted filter value, grouped by dimension.
#[must_use]
pub fn get_all_brackets() -> Vec<BracketInfo> {
    let ages = AgeBracket::all().iter().map(|b| {
        let description = match b.bounds() {
            (min, Some(max)) => format!("aged {min} to {max}"),
            (min, None) => format!("aged {min} or older"),
        };
        BracketInfo::new("age", b.as_str(), description)
    });

    let elapsed = ElapsedBracket::all().iter().map(|b| {
        let days = b.max_days();
        let description = if days == 1 {
            "last seen within 1 day".to_string()
        } else {
            format!("last seen within {days} days")
        };
        BracketInfo::new("since", b.as_str(), description)
    });

    let statuses = CaseStatus::all().iter().map(|s| {
        let description = match s {
            CaseStatus::Urgent => "needs immediate attention",
            CaseStatus::Recent => "recently reported",
            CaseStatus::Active => "open case (default for records without a status)",
            CaseStatus::Found => "person has been found",
        };
        BracketInfo::new("status", s.as_str(), description)
    });

    let genders = Gender::all()
        .iter()
        .map(|g| BracketInfo::new("gender", g.as_str(), "accepted but not applied"));

    ages.chain(elapsed).chain(statuses).chain(genders).collect()
}

/// Output format for the brackets command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BracketsOutputFormat {
    /// Table format (default).
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

/// Writes brackets as a table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_table<W: Write>(writer: &mut W, brackets: &[BracketInfo]) -> io::Result<()> {
    writeln!(writer, "{:<8}{:<10}DESCRIPTION", "FILTER", "VALUE")?;
    for b in brackets {
        writeln!(writer, "{:<8}{:<10}{}", b.filter, b.value, b.description)?;
    }
    Ok(())
}

/// Writes brackets as JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(writer: &mut W, brackets: &[BracketInfo]) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(brackets).map_err(output_error)?;
    writeln!(writer, "{json}").map_err(output_error)
}

/// Writes brackets as YAML.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_yaml<W: Write>(writer: &mut W, brackets: &[BracketInfo]) -> crate::Result<()> {
    let yaml = serde_yaml_ng::to_string(brackets).map_err(output_error)?;
    write!(writer, "{yaml}").map_err(output_error)
}

/// Executes the brackets command.
///
/// # Errors
///
/// Returns an error if serialization or output fails.
pub fn cmd_brackets<W: Write>(writer: &mut W, format: BracketsOutputFormat) -> crate::Result<()> {
    let brackets = get_all_brackets();
    match format {
        BracketsOutputFormat::Table => write_table(writer, &brackets).map_err(output_error),
        BracketsOutputFormat::Json => write_json(writer, &brackets),
        BracketsOutputFormat::Yaml => write_yaml(writer, &brackets),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn output_error(e: impl std::fmt::Display) -> crate::Error {
    crate::Error::OperationFailed {
        operation: "write_brackets".to_string(),
        cause: e.to_string(),
    }
}

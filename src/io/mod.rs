//! Case record file input and output.
//!
//! Records are read once per invocation and never written back. Supported
//! formats:
//!
//! | Format | Extensions | Layout |
//! |--------|------------|--------|
//! | JSON | `.json` | array of records |
//! | YAML | `.yaml`, `.yml` | sequence of records |
//! | CSV | `.csv` | header row, one record per line |

mod csv;

use crate::models::CaseRecord;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// JSON array.
    Json,
    /// YAML sequence.
    Yaml,
    /// CSV with a header row.
    Csv,
}

impl RecordFormat {
    /// Returns all formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Yaml, Self::Csv]
    }

    /// Returns the canonical file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::InvalidInput(format!("cannot detect format of {}", path.display()))
            })?;
        ext.parse()
    }
}

impl FromStr for RecordFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(Error::InvalidInput(format!(
                "unsupported record format '{other}' (expected json, yaml, or csv)"
            ))),
        }
    }
}

/// Loads records from a file, detecting the format from its extension.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its content is malformed.
pub fn load_records(path: &Path) -> Result<Vec<CaseRecord>> {
    let format = RecordFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| Error::OperationFailed {
        operation: "open_records_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    let records = read_records(BufReader::new(file), format)?;
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        count = records.len(),
        "loaded case records"
    );
    Ok(records)
}

/// Reads records in the given format.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed.
pub fn read_records<R: Read>(reader: R, format: RecordFormat) -> Result<Vec<CaseRecord>> {
    let records: Vec<CaseRecord> = match format {
        RecordFormat::Json => serde_json::from_reader(reader)
            .map_err(|e| Error::InvalidInput(format!("invalid JSON records: {e}")))?,
        RecordFormat::Yaml => serde_yaml_ng::from_reader(reader)
            .map_err(|e| Error::InvalidInput(format!("invalid YAML records: {e}")))?,
        RecordFormat::Csv => csv::read(reader)?,
    };

    warn_on_duplicate_ids(&records);
    Ok(records)
}

/// Writes records in the given format.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_records<W: Write>(
    mut writer: W,
    records: &[CaseRecord],
    format: RecordFormat,
) -> Result<()> {
    match format {
        RecordFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records).map_err(write_error)?;
            writeln!(writer).map_err(write_error)?;
        },
        RecordFormat::Yaml => {
            serde_yaml_ng::to_writer(&mut writer, records).map_err(write_error)?;
        },
        RecordFormat::Csv => csv::write(&mut writer, records)?,
    }
    writer.flush().map_err(write_error)
}

/// Duplicate ids are kept; evaluation preserves them.
fn warn_on_duplicate_ids(records: &[CaseRecord]) {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            tracing::warn!(id = %record.id, "duplicate case id in records");
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: "write_records".to_string(),
        cause: e.to_string(),
    }
}

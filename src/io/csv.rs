//! CSV record adapter.
//!
//! Header names are matched case-insensitively and a few aliases are
//! accepted, so spreadsheets exported by hand load without renaming columns.

use crate::models::{CaseId, CaseRecord, lenient_status};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::io::{Read, Write};

const HEADERS: [&str; 8] = [
    "id",
    "name",
    "age",
    "last_seen",
    "location",
    "photo",
    "description",
    "status",
];

/// Maps CSV column indices to record fields.
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    name: Option<usize>,
    age: Option<usize>,
    last_seen: Option<usize>,
    location: Option<usize>,
    photo: Option<usize>,
    description: Option<usize>,
    status: Option<usize>,
}

impl ColumnMap {
    /// Creates a column map from CSV headers.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "id" => map.id = Some(i),
                "name" | "full_name" => map.name = Some(i),
                "age" => map.age = Some(i),
                "last_seen" | "lastseen" | "date" => map.last_seen = Some(i),
                "location" | "place" => map.location = Some(i),
                "photo" | "image" => map.photo = Some(i),
                "description" | "details" => map.description = Some(i),
                "status" => map.status = Some(i),
                _ => {},
            }
        }

        let missing: Vec<&str> = [
            ("name", map.name),
            ("age", map.age),
            ("last_seen", map.last_seen),
        ]
        .into_iter()
        .filter_map(|(name, idx)| idx.is_none().then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "CSV is missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(map)
    }
}

/// Reads all records from CSV.
pub(super) fn read<R: Read>(reader: R) -> Result<Vec<CaseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::InvalidInput(format!("cannot read CSV headers: {e}")))?
        .clone();
    let map = ColumnMap::from_headers(&headers)?;

    csv_reader
        .records()
        .enumerate()
        .map(|(i, row)| {
            let row = row.map_err(|e| Error::InvalidInput(format!("invalid CSV row: {e}")))?;
            parse_row(&map, &row, i + 1)
        })
        .collect()
}

fn parse_row(map: &ColumnMap, row: &csv::StringRecord, line: usize) -> Result<CaseRecord> {
    let required = |idx: Option<usize>, field: &'static str| {
        get_field(row, idx)
            .ok_or_else(|| Error::InvalidInput(format!("row {line}: missing {field}")))
    };

    let name = required(map.name, "name")?;
    let age = required(map.age, "age")?
        .parse::<u32>()
        .map_err(|e| Error::InvalidInput(format!("row {line}: invalid age: {e}")))?;
    let last_seen = required(map.last_seen, "last_seen")?;
    let last_seen = NaiveDate::parse_from_str(last_seen, "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("row {line}: invalid last_seen: {e}")))?;

    let id = get_field(row, map.id).map_or_else(|| CaseId::new(line.to_string()), CaseId::new);

    Ok(CaseRecord {
        id,
        name: name.to_string(),
        age,
        last_seen,
        location: get_field(row, map.location).unwrap_or_default().to_string(),
        photo: get_field(row, map.photo).map(String::from),
        description: get_field(row, map.description)
            .unwrap_or_default()
            .to_string(),
        status: get_field(row, map.status).and_then(lenient_status),
    })
}

/// Returns a trimmed, non-empty cell.
fn get_field(row: &csv::StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Writes records as CSV with a header row.
pub(super) fn write<W: Write>(writer: W, records: &[CaseRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS).map_err(write_error)?;

    for record in records {
        let age = record.age.to_string();
        let last_seen = record.last_seen.format("%Y-%m-%d").to_string();
        csv_writer
            .write_record([
                record.id.as_str(),
                record.name.as_str(),
                age.as_str(),
                last_seen.as_str(),
                record.location.as_str(),
                record.photo.as_deref().unwrap_or_default(),
                record.description.as_str(),
                record.status.map(|s| s.as_str()).unwrap_or_default(),
            ])
            .map_err(write_error)?;
    }

    csv_writer.flush().map_err(write_error)
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: "write_csv".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseStatus;

    #[test]
    fn test_read_with_aliases() {
        let data = "ID,Full_Name,Age,LastSeen,Place,Status\n\
                    1,Maria Silva,28,2024-05-20,\"São Paulo, SP\",recent\n";
        let records = read(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Maria Silva");
        assert_eq!(records[0].location, "São Paulo, SP");
        assert_eq!(records[0].status, Some(CaseStatus::Recent));
    }

    #[test]
    fn test_missing_id_uses_row_number() {
        let data = "name,age,last_seen\nAna,17,2024-05-18\nJoão,45,2024-05-15\n";
        let records = read(data.as_bytes()).unwrap();
        assert_eq!(records[0].id.as_str(), "1");
        assert_eq!(records[1].id.as_str(), "2");
    }

    #[test]
    fn test_missing_required_column() {
        let data = "name,location\nAna,BH\n";
        let err = read(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("last_seen"));
    }

    #[test]
    fn test_invalid_age() {
        let data = "name,age,last_seen\nAna,seventeen,2024-05-18\n";
        let err = read(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_unknown_status_is_unset() {
        let data = "name,age,last_seen,status\nAna,17,2024-05-18,missing\n";
        let records = read(data.as_bytes()).unwrap();
        assert_eq!(records[0].status, None);
    }
}

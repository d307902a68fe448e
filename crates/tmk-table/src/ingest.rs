use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::{ObjectId, SampleRow, TrackId};

fn schema_error(code: &str, message: impl Into<String>) -> TmkError {
    TmkError::Schema(ErrorInfo::new(code, message.into()))
}

/// Required sample-table column headers, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "track_id",
    "object_id",
    "time",
    "position_x",
    "position_y",
    "position_z",
    "displacement_sq",
    "speed",
    "time_since_track_start",
    "cluster_label",
];

/// Optional per-step path length column header.
pub const STEP_LENGTH_COLUMN: &str = "displacement_delta_length";

struct ColumnMap {
    required: [usize; 10],
    step_length: Option<usize>,
}

fn map_columns(headers: &StringRecord) -> Result<ColumnMap, TmkError> {
    let position_of = |name: &str| headers.iter().position(|header| header == name);
    let mut required = [0usize; 10];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        *slot = position_of(name).ok_or_else(|| {
            TmkError::Schema(
                ErrorInfo::new("missing-column", "required sample column is absent")
                    .with_context("column", *name)
                    .with_hint("export the full per-cell statistics table"),
            )
        })?;
    }
    Ok(ColumnMap {
        required,
        step_length: position_of(STEP_LENGTH_COLUMN),
    })
}

fn cell<'r>(record: &'r StringRecord, idx: usize, line: u64) -> Result<&'r str, TmkError> {
    record.get(idx).ok_or_else(|| {
        TmkError::Schema(
            ErrorInfo::new("short-record", "record has fewer cells than the header")
                .with_context("line", line.to_string()),
        )
    })
}

fn parse_f64(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64, TmkError> {
    let raw = cell(record, idx, line)?;
    raw.trim().parse::<f64>().map_err(|err| {
        TmkError::Schema(
            ErrorInfo::new("invalid-cell", err.to_string())
                .with_context("column", name)
                .with_context("line", line.to_string()),
        )
    })
}

fn parse_u64(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<u64, TmkError> {
    let raw = cell(record, idx, line)?;
    raw.trim().parse::<u64>().map_err(|err| {
        TmkError::Schema(
            ErrorInfo::new("invalid-cell", err.to_string())
                .with_context("column", name)
                .with_context("line", line.to_string()),
        )
    })
}

fn parse_i64(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<i64, TmkError> {
    let raw = cell(record, idx, line)?;
    raw.trim().parse::<i64>().map_err(|err| {
        TmkError::Schema(
            ErrorInfo::new("invalid-cell", err.to_string())
                .with_context("column", name)
                .with_context("line", line.to_string()),
        )
    })
}

/// Reads a sample table from any CSV source.
///
/// Required columns are checked against the header up front; an absent
/// required column fails fast with the `missing-column` error instead of
/// being reconstructed from whatever columns happen to be present. The
/// per-step path length column is optional, and empty cells in it read as
/// absent.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<SampleRow>, TmkError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| schema_error("header-read", err.to_string()))?
        .clone();
    let columns = map_columns(&headers)?;

    let [track_id, object_id, time, pos_x, pos_y, pos_z, displacement_sq, speed, track_time, cluster_label] =
        columns.required;

    let mut samples = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let line = idx as u64 + 2;
        let record = record.map_err(|err| {
            TmkError::Schema(
                ErrorInfo::new("record-read", err.to_string())
                    .with_context("line", line.to_string()),
            )
        })?;
        let step_length = match columns.step_length {
            Some(col) => {
                let raw = cell(&record, col, line)?.trim();
                if raw.is_empty() {
                    None
                } else {
                    Some(parse_f64(&record, col, STEP_LENGTH_COLUMN, line)?)
                }
            }
            None => None,
        };
        samples.push(SampleRow {
            track_id: TrackId::from_raw(parse_u64(&record, track_id, "track_id", line)?),
            object_id: ObjectId::from_raw(parse_u64(&record, object_id, "object_id", line)?),
            time: parse_f64(&record, time, "time", line)?,
            position: [
                parse_f64(&record, pos_x, "position_x", line)?,
                parse_f64(&record, pos_y, "position_y", line)?,
                parse_f64(&record, pos_z, "position_z", line)?,
            ],
            step_length,
            displacement_sq: parse_f64(&record, displacement_sq, "displacement_sq", line)?,
            speed: parse_f64(&record, speed, "speed", line)?,
            track_time: parse_f64(&record, track_time, "time_since_track_start", line)?,
            cluster_label: parse_i64(&record, cluster_label, "cluster_label", line)?,
        });
    }
    Ok(samples)
}

/// Reads a sample table from a CSV file.
pub fn read_samples_csv(path: &Path) -> Result<Vec<SampleRow>, TmkError> {
    let file = std::fs::File::open(path).map_err(|err| {
        TmkError::Schema(
            ErrorInfo::new("table-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    read_samples(file)
}

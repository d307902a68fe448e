use std::fs;
use std::path::Path;

use serde::Serialize;
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::{to_canonical_json_bytes, SampleRow};
use tmk_motion::{CellMetricsRow, TrackSummary};

fn export_error(err: impl ToString, path: &Path) -> TmkError {
    TmkError::Serde(
        ErrorInfo::new("table-export", err.to_string())
            .with_context("path", path.display().to_string()),
    )
}

fn writer(path: &Path) -> Result<csv::Writer<fs::File>, TmkError> {
    csv::Writer::from_path(path).map_err(|err| export_error(err, path))
}

/// Writes a raw sample table back to CSV.
///
/// Values are written with full float precision, so a written table reads
/// back identically through the ingest path.
pub fn write_samples_csv(path: &Path, samples: &[SampleRow]) -> Result<(), TmkError> {
    let mut wtr = writer(path)?;
    wtr.write_record([
        "track_id",
        "object_id",
        "time",
        "position_x",
        "position_y",
        "position_z",
        "displacement_delta_length",
        "displacement_sq",
        "speed",
        "time_since_track_start",
        "cluster_label",
    ])
    .map_err(|err| export_error(err, path))?;
    for sample in samples {
        wtr.write_record([
            sample.track_id.as_raw().to_string(),
            sample.object_id.as_raw().to_string(),
            sample.time.to_string(),
            sample.position[0].to_string(),
            sample.position[1].to_string(),
            sample.position[2].to_string(),
            sample
                .step_length
                .map(|value| value.to_string())
                .unwrap_or_default(),
            sample.displacement_sq.to_string(),
            sample.speed.to_string(),
            sample.track_time.to_string(),
            sample.cluster_label.to_string(),
        ])
        .map_err(|err| export_error(err, path))?;
    }
    wtr.flush().map_err(|err| export_error(err, path))
}

/// Writes enriched per-timepoint metrics to CSV.
pub fn write_enriched_csv(path: &Path, rows: &[CellMetricsRow]) -> Result<(), TmkError> {
    let mut wtr = writer(path)?;
    wtr.write_record([
        "track_id",
        "object_id",
        "time",
        "n_track",
        "t_track",
        "track_time",
        "cluster_in",
        "cluster_dwell",
        "cluster_dwell_time",
        "step_length",
        "track_length",
        "track_displacement",
        "velocity",
        "msd",
        "meandering_index",
        "arrest_cutoff",
        "arrest_cumulative",
        "arrest_coefficient",
    ])
    .map_err(|err| export_error(err, path))?;
    for row in rows {
        wtr.write_record([
            row.sample.track_id.as_raw().to_string(),
            row.sample.object_id.as_raw().to_string(),
            format!("{:.6}", row.sample.time),
            row.n_track.to_string(),
            row.t_track.to_string(),
            format!("{:.6}", row.track_time),
            row.cluster_in.to_string(),
            row.cluster_dwell.to_string(),
            format!("{:.6}", row.cluster_dwell_time),
            format!("{:.6}", row.step_length),
            format!("{:.6}", row.track_length),
            format!("{:.6}", row.track_displacement),
            format!("{:.6}", row.velocity),
            format!("{:.6}", row.msd),
            format!("{:.6}", row.meandering_index),
            row.arrest_cutoff.to_string(),
            row.arrest_cumulative.to_string(),
            format!("{:.6}", row.arrest_coefficient),
        ])
        .map_err(|err| export_error(err, path))?;
    }
    wtr.flush().map_err(|err| export_error(err, path))
}

/// Writes track summary rows to CSV.
pub fn write_summaries_csv(path: &Path, summaries: &[TrackSummary]) -> Result<(), TmkError> {
    let mut wtr = writer(path)?;
    wtr.write_record([
        "track_id",
        "n_samples",
        "elapsed",
        "distance",
        "displacement",
        "velocity",
        "speed",
        "speed_mean",
        "speed_std",
        "meandering_index",
        "arrest_coefficient",
        "motility",
        "dwell_count",
        "dwell_percent",
        "always_in",
        "always_out",
        "start_in",
        "end_in",
    ])
    .map_err(|err| export_error(err, path))?;
    for summary in summaries {
        wtr.write_record([
            summary.track_id.as_raw().to_string(),
            summary.n_samples.to_string(),
            format!("{:.6}", summary.elapsed),
            format!("{:.6}", summary.distance),
            format!("{:.6}", summary.displacement),
            format!("{:.6}", summary.velocity),
            format!("{:.6}", summary.speed),
            format!("{:.6}", summary.speed_mean),
            format!("{:.6}", summary.speed_std),
            format!("{:.6}", summary.meandering_index),
            format!("{:.6}", summary.arrest_coefficient),
            format!("{:.6}", summary.motility),
            summary.dwell_count.to_string(),
            format!("{:.6}", summary.dwell_percent),
            u8::from(summary.always_in).to_string(),
            u8::from(summary.always_out).to_string(),
            u8::from(summary.start_in).to_string(),
            u8::from(summary.end_in).to_string(),
        ])
        .map_err(|err| export_error(err, path))?;
    }
    wtr.flush().map_err(|err| export_error(err, path))
}

/// Writes any report payload as canonical JSON, dataset reports included.
pub fn export_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TmkError> {
    let bytes = to_canonical_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| export_error(err, path))
}

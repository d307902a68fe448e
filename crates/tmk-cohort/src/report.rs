use chrono::Utc;
use serde::{Deserialize, Serialize};
use tmk_core::errors::TmkError;
use tmk_core::{stable_hash_string, SampleRow};
use tmk_motion::{analyze_tracks, BatchOpts, TrackFailure, TrackSummary};

use crate::transitions::{summarize_dataset, DatasetSummary};

/// Provenance payload recorded in [`DatasetReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisProvenance {
    /// Batch options applied to every track.
    pub opts: BatchOpts,
    /// Cell type or condition label supplied by the caller.
    pub cell_type: String,
    /// Total observation time echoed into the summary.
    pub t_limit: f64,
}

/// Aggregated dataset report capturing track summaries, failures and
/// transition statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetReport {
    /// Stable hash of the deterministic report payload.
    pub analysis_hash: String,
    /// ISO-8601 timestamp recording when the report was assembled.
    pub created_at: String,
    /// Dataset-level transition statistics.
    pub summary: DatasetSummary,
    /// One summary row per processed track, in first-seen order.
    pub tracks: Vec<TrackSummary>,
    /// Tracks rejected by a pipeline stage.
    pub failures: Vec<TrackFailure>,
    /// Provenance payload describing the options used.
    pub provenance: AnalysisProvenance,
}

/// Runs the full pipeline over a mixed-track sample table.
///
/// Per-track failures are isolated into the report; the dataset summary is
/// computed over the tracks that survived. The analysis hash covers every
/// deterministic part of the payload, so identical inputs and options hash
/// identically across runs; the creation timestamp stays outside the hash.
pub fn analyze_dataset(
    samples: &[SampleRow],
    cell_type: &str,
    t_limit: f64,
    opts: &BatchOpts,
) -> Result<DatasetReport, TmkError> {
    let batch = analyze_tracks(samples, opts);
    let summary = summarize_dataset(&batch.summaries, cell_type, t_limit)?;

    let provenance = AnalysisProvenance {
        opts: opts.clone(),
        cell_type: cell_type.to_string(),
        t_limit,
    };
    let analysis_hash =
        stable_hash_string(&(&summary, &batch.summaries, &batch.failures, &provenance))?;

    Ok(DatasetReport {
        analysis_hash,
        created_at: Utc::now().to_rfc3339(),
        summary,
        tracks: batch.summaries,
        failures: batch.failures,
        provenance,
    })
}

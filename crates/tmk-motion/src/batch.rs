use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tmk_core::errors::TmkError;
use tmk_core::{SampleRow, TrackId};

use crate::enrich::enrich_track;
use crate::motility::{fit_motility, MotilityOpts};
use crate::summary::{summarize_track, SpeedUnit, TrackSummary};

/// Options applied to every track of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchOpts {
    /// Motility regression configuration.
    #[serde(default)]
    pub motility: MotilityOpts,
    /// Reporting unit for rate-like summary fields.
    #[serde(default)]
    pub speed_unit: SpeedUnit,
}

/// A track that could not be summarized, with the error that rejected it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackFailure {
    /// Track the failure belongs to.
    pub track_id: TrackId,
    /// Validation error raised by the offending stage.
    pub error: TmkError,
}

/// Outcome of a batch run over a mixed-track sample table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    /// One summary row per successfully processed track, in first-seen order.
    pub summaries: Vec<TrackSummary>,
    /// Tracks rejected by a pipeline stage.
    pub failures: Vec<TrackFailure>,
}

/// Groups a mixed-track sample table by `track_id`.
///
/// Tracks keep the order in which they first appear in the input; rows within
/// a track keep their input order. Cumulative state never crosses a partition
/// boundary, so each group can be enriched independently.
pub fn partition_tracks(samples: &[SampleRow]) -> IndexMap<TrackId, Vec<SampleRow>> {
    let mut groups: IndexMap<TrackId, Vec<SampleRow>> = IndexMap::new();
    for sample in samples {
        groups
            .entry(sample.track_id)
            .or_default()
            .push(sample.clone());
    }
    groups
}

/// Runs enrichment, motility fit and summary for one track.
pub fn analyze_track(rows: &[SampleRow], opts: &BatchOpts) -> Result<TrackSummary, TmkError> {
    let enriched = enrich_track(rows)?;
    let fit = fit_motility(&enriched, &opts.motility)?;
    summarize_track(&enriched, &fit, opts.speed_unit)
}

/// Runs the per-track pipeline over a mixed-track sample table.
///
/// Failures are isolated per track: a rejected track is recorded in the
/// report and never prevents sibling tracks from being processed.
pub fn analyze_tracks(samples: &[SampleRow], opts: &BatchOpts) -> BatchReport {
    let mut summaries = Vec::new();
    let mut failures = Vec::new();
    for (track_id, rows) in partition_tracks(samples) {
        match analyze_track(&rows, opts) {
            Ok(summary) => summaries.push(summary),
            Err(error) => failures.push(TrackFailure { track_id, error }),
        }
    }
    BatchReport {
        summaries,
        failures,
    }
}

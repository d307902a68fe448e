use serde::{Deserialize, Serialize};
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::TrackId;

use crate::enrich::CellMetricsRow;
use crate::motility::MotilityFit;

fn track_error(code: &str, message: impl Into<String>) -> TmkError {
    TmkError::Track(ErrorInfo::new(code, message.into()))
}

/// Reporting unit for rate-like summary fields.
///
/// Sample rates are recorded per second. [`SpeedUnit::PerMinute`] rescales
/// velocity, speed and the speed spread by 60; [`SpeedUnit::Raw`] reports
/// the per-second values untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Rescale rate fields to per-minute values.
    #[default]
    PerMinute,
    /// Report raw per-second values.
    Raw,
}

impl SpeedUnit {
    fn factor(self) -> f64 {
        match self {
            SpeedUnit::PerMinute => 60.0,
            SpeedUnit::Raw => 1.0,
        }
    }
}

/// One track collapsed into a single summary row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackSummary {
    /// Track the summary describes.
    pub track_id: TrackId,
    /// Number of samples in the track.
    pub n_samples: usize,
    /// Elapsed time between the first and last sample.
    pub elapsed: f64,
    /// Total path length at the final sample.
    pub distance: f64,
    /// Net displacement at the final sample.
    pub displacement: f64,
    /// Final-row velocity, scaled to the requested unit.
    pub velocity: f64,
    /// Path length over elapsed time, scaled; 0 when no time elapsed.
    pub speed: f64,
    /// Mean instantaneous speed across all samples, scaled.
    pub speed_mean: f64,
    /// Population standard deviation of instantaneous speed, scaled.
    pub speed_std: f64,
    /// Final-row meandering index.
    pub meandering_index: f64,
    /// Final-row arrest coefficient.
    pub arrest_coefficient: f64,
    /// Motility slope from the bucketed regression.
    pub motility: f64,
    /// Number of in-cluster samples.
    pub dwell_count: u32,
    /// Percentage of samples spent in-cluster.
    pub dwell_percent: f64,
    /// Whether every sample was in-cluster.
    pub always_in: bool,
    /// Whether no sample was in-cluster.
    pub always_out: bool,
    /// Whether the first sample was in-cluster.
    pub start_in: bool,
    /// Whether the last sample was in-cluster.
    pub end_in: bool,
}

/// Collapses one enriched track into its summary row.
///
/// Terminal-state fields read the last row of the sorted track; the speed
/// mean and population spread aggregate over all rows. `enriched` must be the
/// output of [`crate::enrich::enrich_track`] for a single track.
pub fn summarize_track(
    enriched: &[CellMetricsRow],
    fit: &MotilityFit,
    unit: SpeedUnit,
) -> Result<TrackSummary, TmkError> {
    let (Some(first), Some(last)) = (enriched.first(), enriched.last()) else {
        return Err(track_error(
            "empty-track",
            "summary requires at least one enriched row",
        ));
    };

    let n_samples = enriched.len();
    let n = n_samples as f64;
    let m = unit.factor();

    let speed_mean = enriched.iter().map(|row| row.sample.speed).sum::<f64>() / n;
    let speed_var = enriched
        .iter()
        .map(|row| {
            let delta = row.sample.speed - speed_mean;
            delta * delta
        })
        .sum::<f64>()
        / n;

    let elapsed = last.track_time;
    let speed = if elapsed > 0.0 {
        last.track_length * m / elapsed
    } else {
        0.0
    };

    let dwell_count: u32 = enriched.iter().map(|row| row.cluster_in).sum();

    Ok(TrackSummary {
        track_id: first.sample.track_id,
        n_samples,
        elapsed,
        distance: last.track_length,
        displacement: last.track_displacement,
        velocity: last.velocity * m,
        speed,
        speed_mean: speed_mean * m,
        speed_std: speed_var.sqrt() * m,
        meandering_index: last.meandering_index,
        arrest_coefficient: last.arrest_coefficient,
        motility: fit.beta,
        dwell_count,
        dwell_percent: f64::from(dwell_count) * 100.0 / n,
        always_in: dwell_count as usize == n_samples,
        always_out: dwell_count == 0,
        start_in: first.cluster_in == 1,
        end_in: last.cluster_in == 1,
    })
}

use serde::{Deserialize, Serialize};
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::SampleRow;

fn track_error(code: &str, message: impl Into<String>) -> TmkError {
    TmkError::Track(ErrorInfo::new(code, message.into()))
}

/// Instantaneous speed below which a cell counts as arrested.
pub const ARREST_SPEED_CUTOFF: f64 = 2.0 / 60.0;

/// Guard added to the path length when computing the meandering index.
pub const MEANDERING_EPSILON: f64 = 1e-15;

/// One sample enriched with running kinematic and state features.
///
/// Cumulative fields are true prefix sums over the time-sorted track and
/// reset per track; they never carry across track boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMetricsRow {
    /// The raw sample the metrics were derived from.
    pub sample: SampleRow,
    /// Row count of the track.
    pub n_track: usize,
    /// 1-based ordinal index within the time-sorted track.
    pub t_track: usize,
    /// Elapsed time since the track's first sample.
    pub track_time: f64,
    /// 1 when the sample lies inside any cluster region, else 0.
    pub cluster_in: u32,
    /// Running count of in-cluster samples up to and including this row.
    pub cluster_dwell: u32,
    /// Percentage of elapsed samples spent in-cluster.
    pub cluster_dwell_time: f64,
    /// Resolved per-step path length contribution; 0 for the first row.
    pub step_length: f64,
    /// Running cumulative path length.
    pub track_length: f64,
    /// Net displacement from the track start.
    pub track_displacement: f64,
    /// Net displacement over elapsed time; 0 on the first row.
    pub velocity: f64,
    /// Squared net displacement from the track start.
    pub msd: f64,
    /// Net displacement over path length, guarded by [`MEANDERING_EPSILON`].
    pub meandering_index: f64,
    /// 1 when instantaneous speed falls below [`ARREST_SPEED_CUTOFF`].
    pub arrest_cutoff: u32,
    /// Running count of arrested samples.
    pub arrest_cumulative: u32,
    /// Fraction of elapsed samples spent arrested.
    pub arrest_coefficient: f64,
}

fn squared_step(prev: &SampleRow, cur: &SampleRow) -> f64 {
    prev.position
        .iter()
        .zip(cur.position.iter())
        .map(|(a, b)| (b - a) * (b - a))
        .sum()
}

/// Resolves per-step path lengths for a sorted track.
///
/// Exported step lengths are used only when every row carries one; a partial
/// column would silently mix exported and derived units, so the fallback
/// derives all steps from consecutive position differences (the sum of
/// squared coordinate deltas, matching the instrument-absent fallback of the
/// source data). The first row always contributes 0.
fn resolve_steps(sorted: &[SampleRow]) -> Vec<f64> {
    let provided = sorted.iter().all(|row| row.step_length.is_some());
    sorted
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            if idx == 0 {
                0.0
            } else if provided {
                row.step_length.unwrap_or(0.0)
            } else {
                squared_step(&sorted[idx - 1], row)
            }
        })
        .collect()
}

/// Enriches one track's samples into per-timepoint kinematic metrics.
///
/// Rows are stably sorted by `time`; samples sharing a timestamp preserve
/// their input order. All derived fields are computed in a single
/// left-to-right pass over the sorted rows. The caller must group
/// multi-track tables beforehand; rows carrying a foreign `track_id` are
/// rejected rather than silently folded in.
pub fn enrich_track(rows: &[SampleRow]) -> Result<Vec<CellMetricsRow>, TmkError> {
    let Some(first) = rows.first() else {
        return Err(track_error(
            "empty-track",
            "enrichment requires at least one sample",
        ));
    };
    let track_id = first.track_id;
    if let Some(stray) = rows.iter().find(|row| row.track_id != track_id) {
        return Err(track_error(
            "mixed-track",
            format!(
                "sample of track {} mixed into track {}",
                stray.track_id.as_raw(),
                track_id.as_raw()
            ),
        ));
    }

    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
    let steps = resolve_steps(&sorted);

    let n_track = sorted.len();
    let mut enriched = Vec::with_capacity(n_track);
    let mut cluster_dwell = 0u32;
    let mut arrest_cumulative = 0u32;
    let mut track_length = 0.0f64;

    for (idx, row) in sorted.iter().enumerate() {
        let t_track = idx + 1;
        let elapsed_samples = t_track as f64;

        let cluster_in = row.cluster_in();
        cluster_dwell += cluster_in;

        track_length += steps[idx];
        let track_displacement = row.displacement_sq.sqrt();
        let velocity = if row.track_time > 0.0 {
            track_displacement / row.track_time
        } else {
            0.0
        };

        let arrest_cutoff = u32::from(row.speed < ARREST_SPEED_CUTOFF);
        arrest_cumulative += arrest_cutoff;

        enriched.push(CellMetricsRow {
            sample: row.clone(),
            n_track,
            t_track,
            track_time: row.track_time,
            cluster_in,
            cluster_dwell,
            cluster_dwell_time: f64::from(cluster_dwell) / elapsed_samples * 100.0,
            step_length: steps[idx],
            track_length,
            track_displacement,
            velocity,
            msd: row.displacement_sq,
            meandering_index: track_displacement / (track_length + MEANDERING_EPSILON),
            arrest_cutoff,
            arrest_cumulative,
            arrest_coefficient: f64::from(arrest_cumulative) / elapsed_samples,
        });
    }

    Ok(enriched)
}

use serde::{Deserialize, Serialize};
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::round2;
use tmk_motion::TrackSummary;

fn cohort_error(code: &str, message: impl Into<String>) -> TmkError {
    TmkError::Cohort(ErrorInfo::new(code, message.into()))
}

/// One dataset (cell type / condition) collapsed into transition statistics.
///
/// Tracks are partitioned by their start and end cluster state. The
/// always-in / always-out counts are subtracted from the matching same-state
/// partitions, so `n_in_to_in` and `n_out_to_out` count only tracks that
/// left their starting state and returned to it. Each transition percentage
/// is reported twice: normalized over the tracks that ever changed out of
/// the originating state, and over all tracks starting in that state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetSummary {
    /// Cell type or condition the dataset describes.
    pub cell_type: String,
    /// Total observation time the calculations were run over.
    pub t_limit: f64,
    /// Number of summarized tracks.
    pub n_total: usize,
    /// Tracks starting in-cluster.
    pub n_start_in: usize,
    /// Tracks ending in-cluster.
    pub n_end_in: usize,
    /// Tracks starting out-of-cluster.
    pub n_start_out: usize,
    /// Tracks ending out-of-cluster.
    pub n_end_out: usize,
    /// Tracks in-cluster for every sample.
    pub n_always_in: usize,
    /// Tracks out-of-cluster for every sample.
    pub n_always_out: usize,
    /// Tracks starting out that changed state at least once.
    pub n_out_to_change_state: usize,
    /// Tracks starting in that changed state at least once.
    pub n_in_to_change_state: usize,
    /// Tracks starting and ending in-cluster that left in between.
    pub n_in_to_in: usize,
    /// Tracks starting in-cluster and ending outside.
    pub n_in_to_out: usize,
    /// Tracks starting and ending outside that entered in between.
    pub n_out_to_out: usize,
    /// Tracks starting outside and ending in-cluster.
    pub n_out_to_in: usize,
    /// Out→in percentage over out-starting tracks that changed state.
    pub per_out_to_in: f64,
    /// Out→out percentage over out-starting tracks that changed state.
    pub per_out_to_out: f64,
    /// In→out percentage over in-starting tracks that changed state.
    pub per_in_to_out: f64,
    /// In→in percentage over in-starting tracks that changed state.
    pub per_in_to_in: f64,
    /// Out→in percentage over all out-starting tracks.
    pub per_out_to_in_all: f64,
    /// Out→out percentage over all out-starting tracks.
    pub per_out_to_out_all: f64,
    /// In→out percentage over all in-starting tracks.
    pub per_in_to_out_all: f64,
    /// In→in percentage over all in-starting tracks.
    pub per_in_to_in_all: f64,
}

fn checked_diff(lhs: usize, rhs: usize, what: &str) -> Result<usize, TmkError> {
    lhs.checked_sub(rhs).ok_or_else(|| {
        cohort_error(
            "inconsistent-flags",
            format!("always-state count exceeds its partition for {what}"),
        )
    })
}

fn percentage(numerator: usize, denominator: usize, what: &str) -> Result<f64, TmkError> {
    if denominator == 0 {
        return Err(TmkError::Cohort(
            ErrorInfo::new(
                "degenerate-denominator",
                "transition percentage denominator is zero",
            )
            .with_context("denominator", what),
        ));
    }
    Ok(round2(numerator as f64 * 100.0 / denominator as f64))
}

/// Collapses one dataset's track summaries into transition statistics.
///
/// Fails with the `degenerate-denominator` cohort error when any percentage
/// denominator is zero (for example when no track ever changed state); the
/// caller decides whether that reads as "not applicable". NaN or infinite
/// percentages are never produced.
pub fn summarize_dataset(
    tracks: &[TrackSummary],
    cell_type: &str,
    t_limit: f64,
) -> Result<DatasetSummary, TmkError> {
    let n_total = tracks.len();
    let n_start_in = tracks.iter().filter(|track| track.start_in).count();
    let n_end_in = tracks.iter().filter(|track| track.end_in).count();
    let n_start_out = n_total - n_start_in;
    let n_end_out = n_total - n_end_in;
    let n_always_in = tracks.iter().filter(|track| track.always_in).count();
    let n_always_out = tracks.iter().filter(|track| track.always_out).count();

    let n_out_to_change_state = checked_diff(n_start_out, n_always_out, "out-starting tracks")?;
    let n_in_to_change_state = checked_diff(n_start_in, n_always_in, "in-starting tracks")?;

    let n_in_to_out = tracks
        .iter()
        .filter(|track| track.start_in && !track.end_in)
        .count();
    let n_out_to_in = tracks
        .iter()
        .filter(|track| !track.start_in && track.end_in)
        .count();
    let n_in_to_in = checked_diff(
        tracks
            .iter()
            .filter(|track| track.start_in && track.end_in)
            .count(),
        n_always_in,
        "in-to-in tracks",
    )?;
    let n_out_to_out = checked_diff(
        tracks
            .iter()
            .filter(|track| !track.start_in && !track.end_in)
            .count(),
        n_always_out,
        "out-to-out tracks",
    )?;

    Ok(DatasetSummary {
        cell_type: cell_type.to_string(),
        t_limit,
        n_total,
        n_start_in,
        n_end_in,
        n_start_out,
        n_end_out,
        n_always_in,
        n_always_out,
        n_out_to_change_state,
        n_in_to_change_state,
        n_in_to_in,
        n_in_to_out,
        n_out_to_out,
        n_out_to_in,
        per_out_to_in: percentage(n_out_to_in, n_out_to_change_state, "n_out_to_change_state")?,
        per_out_to_out: percentage(n_out_to_out, n_out_to_change_state, "n_out_to_change_state")?,
        per_in_to_out: percentage(n_in_to_out, n_in_to_change_state, "n_in_to_change_state")?,
        per_in_to_in: percentage(n_in_to_in, n_in_to_change_state, "n_in_to_change_state")?,
        per_out_to_in_all: percentage(n_out_to_in, n_start_out, "n_start_out")?,
        per_out_to_out_all: percentage(n_out_to_out, n_start_out, "n_start_out")?,
        per_in_to_out_all: percentage(n_in_to_out, n_start_in, "n_start_in")?,
        per_in_to_in_all: percentage(n_in_to_in, n_start_in, "n_start_in")?,
    })
}

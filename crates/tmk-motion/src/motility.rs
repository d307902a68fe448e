use serde::{Deserialize, Serialize};
use tmk_core::errors::{ErrorInfo, TmkError};
use tmk_core::{round_f64, stable_hash_string};

use crate::enrich::CellMetricsRow;

fn fit_error(code: &str, message: impl Into<String>) -> TmkError {
    TmkError::Fit(ErrorInfo::new(code, message.into()))
}

fn default_bucket_width() -> f64 {
    60.0
}

fn default_max_time() -> f64 {
    600.0
}

fn default_n_buckets() -> usize {
    10
}

/// Bucketing configuration for the motility regression.
///
/// The defaults divide the first 600 time units of a track into ten
/// fixed 60-unit windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotilityOpts {
    /// Width of each time bucket.
    #[serde(default = "default_bucket_width")]
    pub bucket_width: f64,
    /// Samples at or beyond this elapsed time are excluded.
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    /// Number of buckets spanning the retained window.
    #[serde(default = "default_n_buckets")]
    pub n_buckets: usize,
}

impl Default for MotilityOpts {
    fn default() -> Self {
        Self {
            bucket_width: default_bucket_width(),
            max_time: default_max_time(),
            n_buckets: default_n_buckets(),
        }
    }
}

/// Linear fit of squared displacement growth over bucketed elapsed time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotilityFit {
    /// Regression slope; the reported motility value.
    pub beta: f64,
    /// Regression intercept.
    pub intercept: f64,
    /// Coefficient of determination; 0 when the bucket means are constant.
    pub r2: f64,
    /// Mean squared displacement per bucket; `None` for buckets with no samples.
    pub bucket_msd: Vec<Option<f64>>,
    /// Number of samples retained after the time filter.
    pub n_samples: usize,
    /// Number of buckets that received at least one sample.
    pub n_buckets_used: usize,
    /// Stable hash of the fit payload.
    pub fit_hash: String,
}

fn bucket_index(track_time: f64, bucket_width: f64) -> usize {
    let bucket = (track_time / bucket_width).ceil() as usize;
    bucket.max(1)
}

/// Fits the motility slope for one enriched track.
///
/// Samples with `track_time < max_time` are assigned to fixed-width buckets
/// (elapsed time 0 lands in the first bucket) and the per-bucket mean squared
/// displacement is regressed on the bucket index with ordinary least squares.
/// Buckets with no samples are dropped from the regression and reported as
/// `None`. A track represented in fewer than two distinct buckets cannot
/// produce a meaningful slope and fails with the `insufficient-buckets`
/// error; a fabricated slope is never returned.
pub fn fit_motility(rows: &[CellMetricsRow], opts: &MotilityOpts) -> Result<MotilityFit, TmkError> {
    if opts.bucket_width <= 0.0 || opts.n_buckets == 0 {
        return Err(fit_error(
            "invalid-bucketing",
            "bucket width and bucket count must be positive",
        ));
    }
    if opts.max_time > opts.bucket_width * opts.n_buckets as f64 {
        return Err(fit_error(
            "invalid-bucketing",
            "time cutoff exceeds the bucketed window",
        ));
    }

    let mut sums = vec![0.0f64; opts.n_buckets];
    let mut counts = vec![0u32; opts.n_buckets];
    let mut n_samples = 0usize;
    for row in rows {
        if row.track_time >= opts.max_time {
            continue;
        }
        let bucket = bucket_index(row.track_time, opts.bucket_width);
        sums[bucket - 1] += row.msd;
        counts[bucket - 1] += 1;
        n_samples += 1;
    }

    let bucket_msd: Vec<Option<f64>> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&sum, &count)| (count > 0).then(|| round_f64(sum / f64::from(count))))
        .collect();

    let points: Vec<(f64, f64)> = bucket_msd
        .iter()
        .enumerate()
        .filter_map(|(idx, mean)| mean.map(|value| ((idx + 1) as f64, value)))
        .collect();
    let n_buckets_used = points.len();
    if n_buckets_used < 2 {
        return Err(fit_error(
            "insufficient-buckets",
            format!(
                "regression requires at least 2 occupied buckets, found {n_buckets_used}"
            ),
        ));
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx = points.iter().map(|(x, _)| (x - mean_x) * (x - mean_x)).sum::<f64>();
    let sxy = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>();
    let beta = sxy / sxx;
    let intercept = mean_y - beta * mean_x;

    let ss_res = points
        .iter()
        .map(|(x, y)| {
            let predicted = intercept + beta * x;
            (y - predicted) * (y - predicted)
        })
        .sum::<f64>();
    let ss_tot = points.iter().map(|(_, y)| (y - mean_y) * (y - mean_y)).sum::<f64>();
    let r2 = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    let beta = round_f64(beta);
    let intercept = round_f64(intercept);
    let r2 = round_f64(r2);
    let fit_hash = stable_hash_string(&(
        beta,
        intercept,
        r2,
        &bucket_msd,
        n_samples,
        n_buckets_used,
        opts,
    ))?;

    Ok(MotilityFit {
        beta,
        intercept,
        r2,
        bucket_msd,
        n_samples,
        n_buckets_used,
        fit_hash,
    })
}

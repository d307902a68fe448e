//! Deterministic synthetic track generators for tests, benches and fixtures.

use rand::Rng;
use tmk_core::rng::{derive_substream_seed, RngHandle};
use tmk_core::{ObjectId, SampleRow, TrackId, CLUSTER_OUTSIDE};

fn sample(
    track_id: TrackId,
    idx: usize,
    position: [f64; 3],
    step_length: f64,
    displacement_sq: f64,
    speed: f64,
    cluster_label: i64,
) -> SampleRow {
    SampleRow {
        track_id,
        object_id: ObjectId::from_raw(track_id.as_raw() * 100_000 + idx as u64),
        time: idx as f64,
        position,
        step_length: Some(step_length),
        displacement_sq,
        speed,
        track_time: idx as f64,
        cluster_label,
    }
}

/// Generates a track moving along the x axis at constant speed.
///
/// One sample per time unit; displacement grows linearly, so the squared
/// displacement grows quadratically. Step lengths are exported the way an
/// instrument would, so the meandering index stays at its straight-line
/// maximum.
pub fn straight_track(
    track_id: TrackId,
    n_samples: usize,
    speed: f64,
    cluster_label: i64,
) -> Vec<SampleRow> {
    (0..n_samples)
        .map(|idx| {
            let x = speed * idx as f64;
            let step = if idx == 0 { 0.0 } else { speed };
            sample(
                track_id,
                idx,
                [x, 0.0, 0.0],
                step,
                x * x,
                speed,
                cluster_label,
            )
        })
        .collect()
}

/// Generates a track that never moves.
pub fn stationary_track(track_id: TrackId, n_samples: usize, cluster_label: i64) -> Vec<SampleRow> {
    (0..n_samples)
        .map(|idx| sample(track_id, idx, [0.0; 3], 0.0, 0.0, 0.0, cluster_label))
        .collect()
}

/// Generates a random-walk track with uniform steps in `[-step_scale, step_scale]`.
///
/// When `cluster_radius` is provided, samples within that distance of the
/// origin are labeled in-cluster (label 0); all other samples carry the
/// outside sentinel.
pub fn random_walk_track(
    track_id: TrackId,
    n_samples: usize,
    step_scale: f64,
    cluster_radius: Option<f64>,
    rng: &mut RngHandle,
) -> Vec<SampleRow> {
    let mut position = [0.0f64; 3];
    let mut rows = Vec::with_capacity(n_samples);
    for idx in 0..n_samples {
        let mut step_sq = 0.0;
        if idx > 0 {
            for axis in position.iter_mut() {
                let step = rng.inner_mut().gen_range(-step_scale..=step_scale);
                *axis += step;
                step_sq += step * step;
            }
        }
        let step_length = step_sq.sqrt();
        let displacement_sq: f64 = position.iter().map(|axis| axis * axis).sum();
        let cluster_label = match cluster_radius {
            Some(radius) if displacement_sq.sqrt() <= radius => 0,
            _ => CLUSTER_OUTSIDE,
        };
        rows.push(sample(
            track_id,
            idx,
            position,
            step_length,
            displacement_sq,
            step_length,
            cluster_label,
        ));
    }
    rows
}

/// Generates a mixed-track dataset of seeded random walks.
///
/// Each track draws from its own substream of the master seed, so any track
/// can be regenerated independently of the others.
pub fn random_walk_dataset(
    n_tracks: usize,
    n_samples: usize,
    step_scale: f64,
    cluster_radius: Option<f64>,
    seed: u64,
) -> Vec<SampleRow> {
    let mut samples = Vec::with_capacity(n_tracks * n_samples);
    for track in 0..n_tracks {
        let track_id = TrackId::from_raw(track as u64 + 1);
        let mut rng = RngHandle::from_seed(derive_substream_seed(seed, track as u64));
        samples.extend(random_walk_track(
            track_id,
            n_samples,
            step_scale,
            cluster_radius,
            &mut rng,
        ));
    }
    samples
}

use tmk_core::TrackId;
use tmk_motion::synthetic::{random_walk_dataset, stationary_track, straight_track};
use tmk_motion::{analyze_tracks, partition_tracks, BatchOpts};

#[test]
fn partition_keeps_first_seen_track_order() {
    let mut samples = straight_track(TrackId::from_raw(30), 3, 1.0, -1);
    samples.extend(straight_track(TrackId::from_raw(10), 3, 1.0, -1));
    samples.extend(straight_track(TrackId::from_raw(20), 3, 1.0, -1));

    let groups = partition_tracks(&samples);
    let order: Vec<u64> = groups.keys().map(|id| id.as_raw()).collect();
    assert_eq!(order, vec![30, 10, 20]);
    assert!(groups.values().all(|rows| rows.len() == 3));
}

#[test]
fn interleaved_rows_regroup_by_track() {
    let a = straight_track(TrackId::from_raw(1), 4, 1.0, -1);
    let b = straight_track(TrackId::from_raw(2), 4, 2.0, -1);
    let mut samples = Vec::new();
    for (row_a, row_b) in a.iter().zip(b.iter()) {
        samples.push(row_a.clone());
        samples.push(row_b.clone());
    }

    let groups = partition_tracks(&samples);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&TrackId::from_raw(1)], a);
    assert_eq!(groups[&TrackId::from_raw(2)], b);
}

#[test]
fn one_rejected_track_never_blocks_its_siblings() {
    // The middle track spans a single time bucket, so its fit is rejected.
    let mut samples = straight_track(TrackId::from_raw(1), 121, 1.0, -1);
    samples.extend(stationary_track(TrackId::from_raw(2), 5, -1));
    samples.extend(straight_track(TrackId::from_raw(3), 121, 2.0, -1));

    let report = analyze_tracks(&samples, &BatchOpts::default());
    let summarized: Vec<u64> = report
        .summaries
        .iter()
        .map(|summary| summary.track_id.as_raw())
        .collect();
    assert_eq!(summarized, vec![1, 3]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].track_id, TrackId::from_raw(2));
    assert_eq!(report.failures[0].error.code(), "insufficient-buckets");
}

#[test]
fn batch_results_are_deterministic_for_seeded_datasets() {
    let samples = random_walk_dataset(6, 150, 0.5, Some(2.0), 1234);
    let first = analyze_tracks(&samples, &BatchOpts::default());
    let second = analyze_tracks(&samples, &BatchOpts::default());
    assert_eq!(first, second);
    assert_eq!(first.summaries.len() + first.failures.len(), 6);
}

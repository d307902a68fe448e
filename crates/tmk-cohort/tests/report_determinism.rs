use tmk_cohort::analyze_dataset;
use tmk_core::{SampleRow, TrackId};
use tmk_motion::synthetic::{stationary_track, straight_track};
use tmk_motion::BatchOpts;

fn relabeled_after(mut rows: Vec<SampleRow>, from_index: usize, label: i64) -> Vec<SampleRow> {
    for row in rows.iter_mut().skip(from_index) {
        row.cluster_label = label;
    }
    rows
}

fn mixed_dataset() -> Vec<SampleRow> {
    let mut samples = Vec::new();
    // Two residents, two tracks that never enter, two leavers, two entrants.
    samples.extend(straight_track(TrackId::from_raw(1), 121, 1.0, 0));
    samples.extend(straight_track(TrackId::from_raw(2), 121, 1.5, 0));
    samples.extend(straight_track(TrackId::from_raw(3), 121, 1.0, -1));
    samples.extend(straight_track(TrackId::from_raw(4), 121, 0.5, -1));
    samples.extend(relabeled_after(
        straight_track(TrackId::from_raw(5), 121, 1.0, 0),
        60,
        -1,
    ));
    samples.extend(relabeled_after(
        straight_track(TrackId::from_raw(6), 121, 1.0, 0),
        60,
        -1,
    ));
    samples.extend(relabeled_after(
        straight_track(TrackId::from_raw(7), 121, 1.0, -1),
        60,
        0,
    ));
    samples.extend(relabeled_after(
        straight_track(TrackId::from_raw(8), 121, 1.0, -1),
        60,
        0,
    ));
    samples
}

#[test]
fn full_pipeline_report_covers_every_track() {
    let report =
        analyze_dataset(&mixed_dataset(), "tcell", 600.0, &BatchOpts::default()).expect("report");

    assert_eq!(report.tracks.len(), 8);
    assert!(report.failures.is_empty());
    assert_eq!(report.summary.n_total, 8);
    assert_eq!(report.summary.n_always_in, 2);
    assert_eq!(report.summary.n_always_out, 2);
    assert_eq!(report.summary.n_in_to_out, 2);
    assert_eq!(report.summary.n_out_to_in, 2);
    assert_eq!(report.summary.per_in_to_out, 100.0);
    assert_eq!(report.summary.per_out_to_in, 100.0);
    assert_eq!(report.provenance.cell_type, "tcell");
    assert_eq!(report.provenance.t_limit, 600.0);
    assert!(!report.created_at.is_empty());
}

#[test]
fn identical_inputs_hash_identically() {
    let samples = mixed_dataset();
    let opts = BatchOpts::default();
    let first = analyze_dataset(&samples, "tcell", 600.0, &opts).expect("first report");
    let second = analyze_dataset(&samples, "tcell", 600.0, &opts).expect("second report");

    assert_eq!(first.analysis_hash, second.analysis_hash);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.tracks, second.tracks);
}

#[test]
fn rejected_tracks_appear_as_failures_without_blocking_the_summary() {
    let mut samples = mixed_dataset();
    samples.extend(stationary_track(TrackId::from_raw(9), 5, -1));

    let report =
        analyze_dataset(&samples, "tcell", 600.0, &BatchOpts::default()).expect("report");
    assert_eq!(report.tracks.len(), 8);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].track_id, TrackId::from_raw(9));
    assert_eq!(report.failures[0].error.code(), "insufficient-buckets");
    assert_eq!(report.summary.n_total, 8);
}

use tmk_core::{ObjectId, SampleRow, TrackId};
use tmk_motion::{enrich_track, ARREST_SPEED_CUTOFF};

fn row(time: f64, position: [f64; 3], displacement_sq: f64, speed: f64, cluster: i64) -> SampleRow {
    SampleRow {
        track_id: TrackId::from_raw(7),
        object_id: ObjectId::from_raw(700 + time as u64),
        time,
        position,
        step_length: None,
        displacement_sq,
        speed,
        track_time: time,
        cluster_label: cluster,
    }
}

fn small_track() -> Vec<SampleRow> {
    vec![
        row(0.0, [0.0, 0.0, 0.0], 0.0, 0.0, -1),
        row(1.0, [1.0, 0.0, 0.0], 1.0, 1.0, 0),
        row(2.0, [1.0, 1.0, 0.0], 2.0, 1.0, 0),
        row(3.0, [1.0, 1.0, 0.0], 2.0, 0.01, -1),
    ]
}

#[test]
fn derived_fields_follow_the_single_pass_definitions() {
    let enriched = enrich_track(&small_track()).expect("enrich");
    assert_eq!(enriched.len(), 4);

    for (idx, row) in enriched.iter().enumerate() {
        assert_eq!(row.n_track, 4);
        assert_eq!(row.t_track, idx + 1);
        assert_eq!(row.msd, row.sample.displacement_sq);
        assert_eq!(row.track_displacement, row.sample.displacement_sq.sqrt());
    }

    // cluster_in: 0, 1, 1, 0 -> dwell 0, 1, 2, 2
    let dwell: Vec<u32> = enriched.iter().map(|row| row.cluster_dwell).collect();
    assert_eq!(dwell, vec![0, 1, 2, 2]);
    let dwell_time: Vec<f64> = enriched.iter().map(|row| row.cluster_dwell_time).collect();
    assert_eq!(dwell_time[0], 0.0);
    assert_eq!(dwell_time[1], 50.0);
    assert!((dwell_time[2] - 200.0 / 3.0).abs() < 1e-12);
    assert_eq!(dwell_time[3], 50.0);

    // Steps derived from positions as squared coordinate deltas: 0, 1, 1, 0.
    let lengths: Vec<f64> = enriched.iter().map(|row| row.track_length).collect();
    assert_eq!(lengths, vec![0.0, 1.0, 2.0, 2.0]);

    // Arrest: only the last row falls below the cutoff.
    assert!(0.01 < ARREST_SPEED_CUTOFF);
    let arrest: Vec<u32> = enriched.iter().map(|row| row.arrest_cumulative).collect();
    assert_eq!(arrest, vec![0, 0, 0, 1]);
    assert_eq!(enriched[3].arrest_coefficient, 0.25);
}

#[test]
fn first_row_contributes_nothing_to_track_length() {
    let enriched = enrich_track(&small_track()).expect("enrich");
    assert_eq!(enriched[0].step_length, 0.0);
    assert_eq!(enriched[0].track_length, 0.0);
    assert_eq!(enriched[0].velocity, 0.0);
}

#[test]
fn meandering_index_survives_zero_path_length() {
    let rows = vec![row(0.0, [0.0; 3], 0.0, 0.0, -1)];
    let enriched = enrich_track(&rows).expect("enrich");
    assert!(enriched[0].meandering_index.is_finite());
    assert_eq!(enriched[0].meandering_index, 0.0);
}

#[test]
fn unsorted_input_is_sorted_and_ties_keep_input_order() {
    let mut rows = small_track();
    rows.swap(0, 3);
    let enriched = enrich_track(&rows).expect("enrich");
    let times: Vec<f64> = enriched.iter().map(|row| row.sample.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0]);

    // Two rows at time 1.0 keep their relative input order.
    let mut tied = small_track();
    tied[2].time = 1.0;
    let enriched = enrich_track(&tied).expect("enrich");
    assert_eq!(enriched[1].sample.object_id, tied[1].object_id);
    assert_eq!(enriched[2].sample.object_id, tied[2].object_id);
}

#[test]
fn provided_step_lengths_take_precedence() {
    let mut rows = small_track();
    for row in rows.iter_mut() {
        row.step_length = Some(3.0);
    }
    let enriched = enrich_track(&rows).expect("enrich");
    let lengths: Vec<f64> = enriched.iter().map(|row| row.track_length).collect();
    assert_eq!(lengths, vec![0.0, 3.0, 6.0, 9.0]);
}

#[test]
fn partial_step_length_column_falls_back_to_positions() {
    let mut rows = small_track();
    rows[1].step_length = Some(3.0);
    let enriched = enrich_track(&rows).expect("enrich");
    let lengths: Vec<f64> = enriched.iter().map(|row| row.track_length).collect();
    assert_eq!(lengths, vec![0.0, 1.0, 2.0, 2.0]);
}

#[test]
fn empty_track_is_rejected() {
    let err = enrich_track(&[]).expect_err("empty input");
    assert_eq!(err.code(), "empty-track");
}

#[test]
fn foreign_track_rows_are_rejected() {
    let mut rows = small_track();
    rows[2].track_id = TrackId::from_raw(8);
    let err = enrich_track(&rows).expect_err("mixed input");
    assert_eq!(err.code(), "mixed-track");
}

#[test]
fn enrichment_is_idempotent_over_its_own_raw_columns() {
    let first = enrich_track(&small_track()).expect("first pass");
    let raw: Vec<SampleRow> = first.iter().map(|row| row.sample.clone()).collect();
    let second = enrich_track(&raw).expect("second pass");
    assert_eq!(first, second);
}

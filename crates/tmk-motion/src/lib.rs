#![deny(missing_docs)]
#![doc = "Per-track motility pipeline: sample enrichment, bucketed displacement regression and track summary aggregation."]

/// Batch driver with per-track failure isolation.
pub mod batch;
/// Per-timepoint kinematic enrichment.
pub mod enrich;
/// Bucketed mean-squared-displacement regression.
pub mod motility;
/// Per-track summary aggregation.
pub mod summary;
pub mod synthetic;

pub use batch::{analyze_track, analyze_tracks, partition_tracks, BatchOpts, BatchReport, TrackFailure};
pub use enrich::{enrich_track, CellMetricsRow, ARREST_SPEED_CUTOFF, MEANDERING_EPSILON};
pub use motility::{fit_motility, MotilityFit, MotilityOpts};
pub use summary::{summarize_track, SpeedUnit, TrackSummary};

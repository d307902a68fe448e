#![deny(missing_docs)]
#![doc = "Dataset-level transition statistics and full-pipeline report assembly for TMK."]

/// Dataset report assembly.
pub mod report;
/// Cluster-transition partition statistics.
pub mod transitions;

pub use report::{analyze_dataset, AnalysisProvenance, DatasetReport};
pub use transitions::{summarize_dataset, DatasetSummary};

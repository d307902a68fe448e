#![deny(missing_docs)]
#![doc = "CSV ingest and export of TMK sample tables, enriched metrics and summaries."]

/// Report and table export helpers.
pub mod export;
/// Sample-table CSV ingestion.
pub mod ingest;

pub use export::{export_json, write_enriched_csv, write_samples_csv, write_summaries_csv};
pub use ingest::{read_samples, read_samples_csv, REQUIRED_COLUMNS, STEP_LENGTH_COLUMN};

#![deny(missing_docs)]
#![doc = "Core types, structured errors and deterministic helpers for the TMK motility engine."]

pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
pub mod rng;
mod serde;
mod types;

pub use errors::{ErrorInfo, TmkError};
pub use hash::{round2, round_f64, stable_hash_string};
pub use rng::{derive_substream_seed, RngHandle};
pub use self::serde::to_canonical_json_bytes;
pub use types::{ObjectId, SampleRow, TrackId, CLUSTER_OUTSIDE};

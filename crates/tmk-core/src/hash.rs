use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::TmkError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, TmkError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Rounds a floating point value to the canonical precision used in hashed payloads.
pub fn round_f64(value: f64) -> f64 {
    let scaled = (value * 1e9).round();
    scaled / 1e9
}

/// Rounds a reported percentage to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = (value * 1e2).round();
    scaled / 1e2
}

//! Canonical JSON encoding used for stable hashing and exports.

use serde::Serialize;

use crate::errors::{ErrorInfo, TmkError};

/// Encodes a serialisable payload into canonical JSON bytes.
///
/// The payload is routed through `serde_json::Value`, whose map type keeps
/// keys sorted, so byte-identical output is guaranteed for equal payloads
/// regardless of struct field order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, TmkError> {
    let value = serde_json::to_value(value)
        .map_err(|err| TmkError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec(&value)
        .map_err(|err| TmkError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

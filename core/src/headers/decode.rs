// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! Header descriptor parsing.
//!
//! Design notes:
//! - The descriptor arrives as JSON from the upstream header stage.
//! - Parsing goes through `RawHeader` so that bad counts surface as typed
//!   `HeaderError`s instead of opaque serde messages.

use crate::headers::types::{HeaderError, MovespaceHeader, RawHeader};

/// Parse and validate a JSON header descriptor.
///
/// # Returns
/// - `Ok(MovespaceHeader)` if the JSON is well formed and every field is valid.
/// - `Err(HeaderError::Json)` if the JSON cannot be parsed into the raw shape.
/// - Any other `HeaderError` from `RawHeader::validate`.
pub fn header_from_json(json: &str) -> Result<MovespaceHeader, HeaderError> {
    let raw: RawHeader = serde_json::from_str(json).map_err(|e| HeaderError::Json(e.to_string()))?;
    raw.validate()
}

/// Same as `header_from_json`, from an already parsed JSON value.
pub fn header_from_value(value: serde_json::Value) -> Result<MovespaceHeader, HeaderError> {
    let raw: RawHeader = serde_json::from_value(value).map_err(|e| HeaderError::Json(e.to_string()))?;
    raw.validate()
}

// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! Header descriptor serialization, in the same camelCase shape upstream emits.

use crate::headers::types::{HeaderError, MovespaceHeader, RawHeader};

pub fn header_to_json(h: &MovespaceHeader) -> Result<String, HeaderError> {
    serde_json::to_string(&RawHeader::from(*h)).map_err(|e| HeaderError::Json(e.to_string()))
}

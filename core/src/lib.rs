//! movespace-core
//!
//! Pure Rust decoder for movespace measure blocks.
//! No Python, no PyO3, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

pub mod cursor;
pub mod headers;
pub mod telemetry;

// Decoder
pub mod measures;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::DecodeOptions;
    pub use crate::cursor::{ByteCursor, SliceCursor};
    pub use crate::headers::{Endianness, MovespaceHeader, RawHeader};
    pub use crate::measures::{
        decode_blocks, decode_blocks_with, decode_measures, decode_measures_with, parse_movespace_measures,
        BlockJob, DecodedMeasures, MeasureStream, ParallelismProfile,
    };
    pub use crate::types::MovespaceError;
}

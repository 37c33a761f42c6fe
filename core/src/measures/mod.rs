//! Movespace measure decoding.
//!
//! Responsibilities:
//! - Decode the interleaved primary / secondary / energy float streams of a block
//! - Layout arithmetic (iterations, output size, minimum buffer size)
//! - Parallel decode of many independent blocks
//!
//! Non-responsibilities:
//! - Parsing the block header (arrives as a `MovespaceHeader`)
//! - Interpreting what the measures mean

pub mod types;
pub mod layout;
pub mod decode;
pub mod batch;

pub use types::{DecodedMeasures, MeasureError, MeasureIteration, MeasureStream};
pub use layout::BlockLayout;
pub use decode::{decode_measures, decode_measures_with, parse_movespace_measures};
pub use batch::{decode_blocks, decode_blocks_with, BlockJob, ParallelismProfile};

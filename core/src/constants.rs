//! constants.rs
//! Fixed layout constants of a movespace measure block.
//!
//! None of these are configurable: they describe the only block layout seen in
//! shipped assets, and decoders must reproduce them bit-for-bit.

/// Bytes skipped between the block start and the measure payload.
pub const DATA_START_OFFSET: u64 = 0xF4;

/// Outer-loop counter step. Unrelated to the pass sizes.
pub const OUTER_LOOP_STEP: u64 = 9;

/// Width of one encoded measure (IEEE-754 single precision).
pub const MEASURE_WIDTH: usize = 4;

/// Cursor advance between two consecutive measures of one pass.
/// Smaller than `MEASURE_WIDTH`, so neighbouring reads overlap by 3 bytes.
pub const MEASURE_STRIDE: u64 = 1;

/// Bias added to every secondary ("offset") measure.
pub const SECONDARY_BIAS: f64 = 3.0;

/// Bias added to every energy measure.
pub const ENERGY_BIAS: f64 = 6.8;

/// Textual endianness tags accepted from upstream header descriptors.
pub mod endianness_tags {
    pub const BIG: &str = "big";
    pub const LITTLE: &str = "little";
}

// ## 📂 File: `src/measures/layout.rs`

//! measures/layout.rs
//! Offset and size arithmetic for one measure block.
//!
//! Everything here is derived from the decode loop itself, so callers can size
//! buffers and outputs without running a decode.

use std::cmp;

use crate::constants::{DATA_START_OFFSET, MEASURE_WIDTH, OUTER_LOOP_STEP};
use crate::headers::MovespaceHeader;
use crate::measures::types::MeasureStream;

/// Number of outer iterations: how many times `loop_index += 9` runs before
/// reaching `measure_count + energy_measure_count`.
#[inline]
pub fn outer_iterations(header: &MovespaceHeader) -> u64 {
    header.loop_value().div_ceil(OUTER_LOOP_STEP)
}

/// Values emitted by one outer iteration.
#[inline]
pub fn values_per_iteration(header: &MovespaceHeader) -> u64 {
    2 * u64::from(header.measure_count) + u64::from(header.energy_measure_count)
}

/// Length of the flat decode output.
#[inline]
pub fn expected_len(header: &MovespaceHeader) -> u64 {
    outer_iterations(header).saturating_mul(values_per_iteration(header))
}

/// Offset a pass seeks to before its first read.
pub fn pass_base(start: u64, header: &MovespaceHeader, stream: MeasureStream) -> u64 {
    let data_start = start.saturating_add(DATA_START_OFFSET);
    match stream {
        MeasureStream::Primary => data_start,
        // Secondary and energy share the same base.
        MeasureStream::Secondary | MeasureStream::Energy => {
            data_start.saturating_add(u64::from(header.measure_count))
        }
    }
}

/// Smallest buffer length for which a decode starting at `start` succeeds.
pub fn required_len(start: u64, header: &MovespaceHeader) -> u64 {
    if header.loop_value() == 0 {
        return start;
    }
    let m = u64::from(header.measure_count);
    let e = u64::from(header.energy_measure_count);
    // Last read of the secondary/energy passes always ends furthest out.
    pass_base(start, header, MeasureStream::Secondary)
        .saturating_add(cmp::max(m, e) - 1)
        .saturating_add(MEASURE_WIDTH as u64)
}

/// Precomputed layout of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub start: u64,
    pub primary_base: u64,
    pub secondary_base: u64,
    pub energy_base: u64,
    pub outer_iterations: u64,
    pub values_per_iteration: u64,
    pub expected_len: u64,
    pub required_len: u64,
}

impl BlockLayout {
    pub fn new(start: u64, header: &MovespaceHeader) -> Self {
        Self {
            start,
            primary_base: pass_base(start, header, MeasureStream::Primary),
            secondary_base: pass_base(start, header, MeasureStream::Secondary),
            energy_base: pass_base(start, header, MeasureStream::Energy),
            outer_iterations: outer_iterations(header),
            values_per_iteration: values_per_iteration(header),
            expected_len: expected_len(header),
            required_len: required_len(start, header),
        }
    }

    /// Does a buffer of `len` bytes hold every offset this block reads?
    pub fn fits(&self, len: u64) -> bool {
        len >= self.required_len
    }
}

// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters filled in while a block decodes.
//!
//! Summary: counts cursor traffic and values per stream.
//! Converted into an immutable `TelemetrySnapshot` at the end of a decode.
use std::ops::AddAssign;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::measures::MeasureStream;

/// Deterministic counters collected during measure decoding.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeCounters {
    pub blocks: u64,
    pub outer_iterations: u64,
    pub seeks: u64,
    pub reads: u64,
    pub bytes_read: u64,
    pub values_primary: u64,
    pub values_secondary: u64,
    pub values_energy: u64,
}

impl DecodeCounters {
    pub fn add_seek(&mut self) {
        self.seeks += 1;
    }

    /// Record one measure read of `width` bytes for `stream`.
    pub fn add_value(&mut self, stream: MeasureStream, width: usize) {
        self.reads += 1;
        self.bytes_read += width as u64;
        match stream {
            MeasureStream::Primary => self.values_primary += 1,
            MeasureStream::Secondary => self.values_secondary += 1,
            MeasureStream::Energy => self.values_energy += 1,
        }
    }

    pub fn add_iteration(&mut self) {
        self.outer_iterations += 1;
    }

    pub fn add_block(&mut self) {
        self.blocks += 1;
    }

    /// Total values appended to the output.
    pub fn values_total(&self) -> u64 {
        self.values_primary + self.values_secondary + self.values_energy
    }

    /// Fold another block's counters into this one (batch decode aggregation).
    pub fn merge(&mut self, other: &DecodeCounters) {
        self.blocks += other.blocks;
        self.outer_iterations += other.outer_iterations;
        self.seeks += other.seeks;
        self.reads += other.reads;
        self.bytes_read += other.bytes_read;
        self.values_primary += other.values_primary;
        self.values_secondary += other.values_secondary;
        self.values_energy += other.values_energy;
    }

    /// Compact binary export (bincode standard config).
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(counters)
    }
}

impl AddAssign for DecodeCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

// ## 📂 File: `src/measures/types.rs`

//! measures/types.rs
//! Stream identifiers, decode errors, and the segmented view over a decoded block.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ENERGY_BIAS, SECONDARY_BIAS};
use crate::cursor::CursorError;
use crate::headers::MovespaceHeader;
use crate::measures::layout;

/// The three logical streams interleaved in every outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureStream {
    Primary,
    /// Also called the "offset" stream upstream.
    Secondary,
    Energy,
}

impl MeasureStream {
    pub const ALL: [MeasureStream; 3] = [MeasureStream::Primary, MeasureStream::Secondary, MeasureStream::Energy];

    /// Constant added to every raw value of this stream.
    pub const fn bias(self) -> f64 {
        match self {
            MeasureStream::Primary => 0.0,
            MeasureStream::Secondary => SECONDARY_BIAS,
            MeasureStream::Energy => ENERGY_BIAS,
        }
    }

    /// Widen a raw value and apply the stream bias.
    ///
    /// Primary values are passed through untouched (adding `0.0` would turn
    /// `-0.0` into `+0.0`).
    #[inline]
    pub fn apply(self, raw: f32) -> f64 {
        match self {
            MeasureStream::Primary => f64::from(raw),
            other => f64::from(raw) + other.bias(),
        }
    }
}

impl fmt::Display for MeasureStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasureStream::Primary => "primary",
            MeasureStream::Secondary => "secondary",
            MeasureStream::Energy => "energy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// A measure read ran past the end of the buffer mid-decode.
    #[error("{stream} measure {index} at offset {offset}: {source}")]
    OutOfRange {
        stream: MeasureStream,
        index: u32,
        offset: u64,
        #[source]
        source: CursorError,
    },

    /// Bounds preflight found the buffer too short before any read.
    #[error("block needs {required} bytes but buffer holds {len}")]
    Truncated { required: u64, len: u64 },

    /// Header asks for more outer iterations than the configured limit.
    #[error("{iterations} outer iterations exceed limit of {max}")]
    LimitExceeded { iterations: u64, max: u64 },

    /// Stored values do not match the length the header implies.
    #[error("header implies {expected} values, found {actual}")]
    LengthMismatch { expected: u64, actual: u64 },
}

impl MeasureError {
    /// True for both mid-decode read failures and preflight rejections.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MeasureError::OutOfRange { .. } | MeasureError::Truncated { .. })
    }
}

/// One outer iteration's worth of values, split by stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureIteration<'a> {
    pub primary: &'a [f64],
    pub secondary: &'a [f64],
    pub energy: &'a [f64],
}

impl<'a> MeasureIteration<'a> {
    pub fn stream(&self, stream: MeasureStream) -> &'a [f64] {
        match stream {
            MeasureStream::Primary => self.primary,
            MeasureStream::Secondary => self.secondary,
            MeasureStream::Energy => self.energy,
        }
    }
}

/// Flat decode output plus the header it was decoded with.
///
/// The flat order is the contract; the segment accessors only slice it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredMeasures")]
pub struct DecodedMeasures {
    header: MovespaceHeader,
    values: Vec<f64>,
}

/// Deserialization form; checked against the header before use.
#[derive(Deserialize)]
struct StoredMeasures {
    header: MovespaceHeader,
    values: Vec<f64>,
}

impl TryFrom<StoredMeasures> for DecodedMeasures {
    type Error = MeasureError;

    fn try_from(stored: StoredMeasures) -> Result<Self, Self::Error> {
        let expected = layout::expected_len(&stored.header);
        let actual = stored.values.len() as u64;
        if actual != expected {
            return Err(MeasureError::LengthMismatch { expected, actual });
        }
        Ok(Self::new(stored.header, stored.values))
    }
}

impl DecodedMeasures {
    pub(crate) fn new(header: MovespaceHeader, values: Vec<f64>) -> Self {
        Self { header, values }
    }

    pub fn header(&self) -> &MovespaceHeader {
        &self.header
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values emitted per outer iteration (`2 * measure_count + energy_measure_count`).
    pub fn per_iteration(&self) -> usize {
        2 * self.header.measure_count as usize + self.header.energy_measure_count as usize
    }

    /// Number of outer iterations present in the output.
    pub fn iterations(&self) -> usize {
        match self.per_iteration() {
            0 => 0,
            n => self.values.len() / n,
        }
    }

    pub fn iteration(&self, i: usize) -> Option<MeasureIteration<'_>> {
        if i >= self.iterations() {
            return None;
        }
        let m = self.header.measure_count as usize;
        let base = i * self.per_iteration();
        let block = &self.values[base..base + self.per_iteration()];
        let (primary, rest) = block.split_at(m);
        let (secondary, energy) = rest.split_at(m);
        Some(MeasureIteration { primary, secondary, energy })
    }

    pub fn stream(&self, i: usize, stream: MeasureStream) -> Option<&[f64]> {
        self.iteration(i).map(|it| it.stream(stream))
    }

    pub fn iter(&self) -> impl Iterator<Item = MeasureIteration<'_>> + '_ {
        (0..self.iterations()).filter_map(move |i| self.iteration(i))
    }
}

impl AsRef<[f64]> for DecodedMeasures {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::Endianness;

    #[test]
    fn primary_keeps_negative_zero() {
        let v = MeasureStream::Primary.apply(-0.0);
        assert!(v.is_sign_negative());
        assert_eq!(MeasureStream::Secondary.apply(1.0), 4.0);
        assert_eq!(MeasureStream::Energy.apply(0.0), 6.8);
    }

    #[test]
    fn iteration_slices_follow_flat_order() {
        let header = MovespaceHeader::new(Endianness::Little, 2, 1);
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let decoded = DecodedMeasures::new(header, values);

        assert_eq!(decoded.per_iteration(), 5);
        assert_eq!(decoded.iterations(), 2);

        let second = decoded.iteration(1).unwrap();
        assert_eq!(second.primary, &[6.0, 7.0]);
        assert_eq!(second.secondary, &[8.0, 9.0]);
        assert_eq!(second.energy, &[10.0]);
        assert!(decoded.iteration(2).is_none());
        assert_eq!(decoded.iter().count(), 2);
    }

    #[test]
    fn empty_header_has_no_iterations() {
        let decoded = DecodedMeasures::new(MovespaceHeader::new(Endianness::Big, 0, 0), Vec::new());
        assert_eq!(decoded.iterations(), 0);
        assert!(decoded.stream(0, MeasureStream::Primary).is_none());
    }

    #[test]
    fn stored_measures_must_match_header() {
        let header = MovespaceHeader::new(Endianness::Little, 1, 0);
        let decoded = DecodedMeasures::new(header, vec![0.5, 3.5]);
        let json = serde_json::to_string(&decoded).unwrap();
        let back: DecodedMeasures = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decoded);

        let tampered = json.replace("[0.5,3.5]", "[0.5,3.5,1.0]");
        assert_ne!(tampered, json);
        let err = serde_json::from_str::<DecodedMeasures>(&tampered).unwrap_err();
        assert!(err.to_string().contains("header implies 2 values, found 3"));
    }
}

// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Header descriptor consumed by the measure decoder.
//!
//! Design notes:
//! - `MovespaceHeader` is the validated form: counts are unsigned and the
//!   endianness is a closed enum, so a decode can never see nonsense input.
//! - `RawHeader` mirrors what the upstream header stage emits (string tag,
//!   signed counts, camelCase keys) and is only turned into a
//!   `MovespaceHeader` through `validate()`.

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::endianness_tags;

/// Byte order used to interpret a raw 4-byte float.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    Little,
}

impl Endianness {
    pub const fn as_str(self) -> &'static str {
        match self {
            Endianness::Big => endianness_tags::BIG,
            Endianness::Little => endianness_tags::LITTLE,
        }
    }

    #[inline]
    pub fn decode_f32(self, raw: &[u8; 4]) -> f32 {
        match self {
            Endianness::Big => BigEndian::read_f32(raw),
            Endianness::Little => LittleEndian::read_f32(raw),
        }
    }

    #[inline]
    pub fn encode_f32(self, value: f32) -> [u8; 4] {
        let mut out = [0u8; 4];
        match self {
            Endianness::Big => BigEndian::write_f32(&mut out, value),
            Endianness::Little => LittleEndian::write_f32(&mut out, value),
        }
        out
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endianness {
    type Err = HeaderError;

    /// Tags are matched exactly; upstream only ever emits lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            endianness_tags::BIG => Ok(Endianness::Big),
            endianness_tags::LITTLE => Ok(Endianness::Little),
            other => Err(HeaderError::UnknownEndianness { raw: other.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// A count field was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    /// A count field does not fit the decoder's `u32` range.
    #[error("{field} exceeds {max}, got {value}", max = u32::MAX)]
    CountTooLarge { field: &'static str, value: i64 },

    /// Endianness tag other than "big" / "little".
    #[error("unsupported endianness tag: {raw:?}")]
    UnknownEndianness { raw: String },

    /// Descriptor could not be parsed at all.
    #[error("malformed header descriptor: {0}")]
    Json(String),
}

/// Validated header descriptor for one measure block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHeader", into = "RawHeader")]
pub struct MovespaceHeader {
    pub endianness: Endianness,
    /// Primary measures per block; also the secondary measure count.
    pub measure_count: u32,
    pub energy_measure_count: u32,
}

impl MovespaceHeader {
    pub const fn new(endianness: Endianness, measure_count: u32, energy_measure_count: u32) -> Self {
        Self { endianness, measure_count, energy_measure_count }
    }

    /// Bound of the outer decode loop (`measure_count + energy_measure_count`).
    #[inline]
    pub fn loop_value(&self) -> u64 {
        u64::from(self.measure_count) + u64::from(self.energy_measure_count)
    }

    /// One-line description used in logs.
    pub fn summary(&self) -> String {
        format!(
            "endianness={} measures={} energy_measures={}",
            self.endianness, self.measure_count, self.energy_measure_count
        )
    }
}

/// Header descriptor as produced upstream, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHeader {
    pub endianness: String,
    #[serde(alias = "measure_count")]
    pub measure_count: i64,
    #[serde(alias = "energy_measure_count")]
    pub energy_measure_count: i64,
}

impl RawHeader {
    pub fn validate(&self) -> Result<MovespaceHeader, HeaderError> {
        let endianness = self.endianness.parse::<Endianness>()?;
        let measure_count = checked_count("measureCount", self.measure_count)?;
        let energy_measure_count = checked_count("energyMeasureCount", self.energy_measure_count)?;
        Ok(MovespaceHeader { endianness, measure_count, energy_measure_count })
    }
}

fn checked_count(field: &'static str, value: i64) -> Result<u32, HeaderError> {
    if value < 0 {
        return Err(HeaderError::NegativeCount { field, value });
    }
    u32::try_from(value).map_err(|_| HeaderError::CountTooLarge { field, value })
}

impl TryFrom<RawHeader> for MovespaceHeader {
    type Error = HeaderError;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

impl From<MovespaceHeader> for RawHeader {
    fn from(h: MovespaceHeader) -> Self {
        Self {
            endianness: h.endianness.as_str().to_owned(),
            measure_count: i64::from(h.measure_count),
            energy_measure_count: i64::from(h.energy_measure_count),
        }
    }
}

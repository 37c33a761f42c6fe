// ## 📂 File: `src/cursor/types.rs`

//! cursor/types.rs
//! The byte cursor contract consumed by the measure decoder.
//!
//! Design notes:
//! - Positions are absolute `u64` offsets from the start of the buffer.
//! - `seek` never validates; only `read` can fail.
//! - A failed read leaves the position where it was.

use std::io;

use thiserror::Error;

use crate::headers::Endianness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// A read would run past the end of the backing buffer.
    #[error("read of {requested} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfRange { offset: u64, requested: usize, len: u64 },
}

/// Seekable, position-tracking reader over a fixed-size buffer.
pub trait ByteCursor {
    /// Current absolute byte offset.
    fn tell(&self) -> u64;

    /// Set the absolute byte offset. Offsets past the end are allowed; the
    /// next read will fail instead.
    fn seek(&mut self, offset: u64);

    /// Read exactly `n` bytes and advance by `n`.
    fn read(&mut self, n: usize) -> Result<&[u8], CursorError>;

    /// Total length of the backing buffer.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the current position and the end.
    fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.tell())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError>
    where
        Self: Sized,
    {
        let bytes = self.read(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read one IEEE-754 single-precision float in the given byte order.
    fn read_f32(&mut self, endianness: Endianness) -> Result<f32, CursorError>
    where
        Self: Sized,
    {
        let raw = self.read_array::<4>()?;
        Ok(endianness.decode_f32(&raw))
    }
}

/// Resolve `[pos, pos + n)` against a buffer of `len` bytes.
#[inline]
pub(crate) fn checked_range(pos: u64, n: usize, len: usize) -> Result<(usize, usize), CursorError> {
    let out_of_range = CursorError::OutOfRange { offset: pos, requested: n, len: len as u64 };
    let start = usize::try_from(pos).map_err(|_| out_of_range)?;
    let end = start.checked_add(n).ok_or(out_of_range)?;
    if end > len {
        return Err(out_of_range);
    }
    Ok((start, end))
}

/// `std::io::Cursor` already tracks an absolute position, so it satisfies the
/// contract directly.
impl<T: AsRef<[u8]>> ByteCursor for io::Cursor<T> {
    #[inline]
    fn tell(&self) -> u64 {
        self.position()
    }

    #[inline]
    fn seek(&mut self, offset: u64) {
        self.set_position(offset);
    }

    fn read(&mut self, n: usize) -> Result<&[u8], CursorError> {
        let (start, end) = checked_range(self.position(), n, self.get_ref().as_ref().len())?;
        self.set_position(end as u64);
        Ok(&self.get_ref().as_ref()[start..end])
    }

    #[inline]
    fn len(&self) -> u64 {
        self.get_ref().as_ref().len() as u64
    }
}

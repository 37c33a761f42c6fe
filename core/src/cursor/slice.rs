// ## 📂 File: `src/cursor/slice.rs`

use crate::cursor::types::{checked_range, ByteCursor, CursorError};

/// Cursor over any contiguous byte container (`&[u8]`, `Vec<u8>`, `bytes::Bytes`, ...).
#[derive(Debug, Clone)]
pub struct SliceCursor<B> {
    buf: B,
    pos: u64,
}

impl<B: AsRef<[u8]>> SliceCursor<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, pos: 0 }
    }

    /// Cursor already positioned at `pos` (e.g. the start of a measure block).
    pub fn at(buf: B, pos: u64) -> Self {
        Self { buf, pos }
    }
}

impl<B: AsRef<[u8]>> ByteCursor for SliceCursor<B> {
    #[inline]
    fn tell(&self) -> u64 {
        self.pos
    }

    #[inline]
    fn seek(&mut self, offset: u64) {
        self.pos = offset;
    }

    #[inline]
    fn read(&mut self, n: usize) -> Result<&[u8], CursorError> {
        let buf = self.buf.as_ref();
        let (start, end) = checked_range(self.pos, n, buf.len())?;
        self.pos = end as u64;
        Ok(&buf[start..end])
    }

    #[inline]
    fn len(&self) -> u64 {
        self.buf.as_ref().len() as u64
    }
}

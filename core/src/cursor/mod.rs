//! cursor/mod.rs
//! Seekable byte cursors over fully loaded buffers.
//!
//! Responsibilities:
//! - Define the `ByteCursor` contract (`tell` / `seek` / `read`)
//! - Provide an owned/borrowed slice cursor and an adapter for `std::io::Cursor`
//! - Endian-aware f32 reads on top of raw reads
//!
//! Non-responsibilities:
//! - File or network IO (buffers arrive already loaded)
//! - Knowledge of the measure block layout

pub mod types;
pub mod slice;

pub use types::{ByteCursor, CursorError};
pub use slice::SliceCursor;

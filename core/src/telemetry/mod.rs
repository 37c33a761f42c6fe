//! telemetry/mod.rs
//! Decode telemetry: counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are plain fields, merged after the fact; no atomics.
//! - Snapshots serialize with serde for export next to log output.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;

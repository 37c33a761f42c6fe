//! headers/mod.rs
//! Header descriptor for movespace measure blocks.
//!
//! Notes:
//! - The binary block header itself is parsed upstream; this module only
//!   models the three fields the measure decoder needs.
//! - Counts are validated once here so the decoder can trust them.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;

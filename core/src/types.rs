use thiserror::Error;

use crate::config::ConfigError;
use crate::headers::HeaderError;
use crate::measures::MeasureError;

/// Unified error covering header, measure, and config failures.
/// Cursor failures reach callers wrapped in `MeasureError::OutOfRange`.
/// - `From<T>` impls enable `?` across module boundaries.
/// - Messages are stable enough for logs and the Python layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovespaceError {
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    #[error("measure error: {0}")]
    Measure(#[from] MeasureError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Batch worker pool failure.
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl MovespaceError {
    /// Read or preflight failure because the buffer is too short.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            MovespaceError::Measure(e) => e.is_out_of_range(),
            _ => false,
        }
    }

    /// Caller handed in a bad header or bad options.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            MovespaceError::Header(_)
                | MovespaceError::Config(_)
                | MovespaceError::Measure(MeasureError::LimitExceeded { .. })
        )
    }
}

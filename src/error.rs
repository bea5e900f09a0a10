//! Error types for the polymatch crate

use thiserror::Error;

/// Main error type for the polymatch crate
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("shape count {count} is out of range ({min}..={max})")]
    ShapeCount { count: usize, min: usize, max: usize },

    #[error("segment count {count} is out of range ({min}..={max})")]
    SegmentCount { count: usize, min: usize, max: usize },

    #[error("{name} must be positive and finite, got {value}")]
    Duration { name: &'static str, value: f32 },
}

/// Result type alias for the polymatch crate
pub type Result<T> = std::result::Result<T, Error>;

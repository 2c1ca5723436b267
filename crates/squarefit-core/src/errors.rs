use squarefit_canonical::{FingerprintError, ValidationError};
use thiserror::Error;

/// Structural problems with submitted corner data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInput {
    /// No squares were submitted.
    #[error("packing contains no squares")]
    Empty,
    /// A corner set does not have exactly four points.
    #[error("square {index} has {found} corners, expected 4")]
    WrongArity {
        /// Square index in submission order.
        index: usize,
        /// Number of corners found.
        found: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("square {index} corner {corner} has a non-finite coordinate")]
    NonFinite {
        /// Square index in submission order.
        index: usize,
        /// Corner index within the square.
        corner: usize,
    },
    /// A coordinate is too large to quantize with the configured scale.
    #[error("square {index} corner {corner} is out of quantizable range")]
    OutOfRange {
        /// Square index in submission order.
        index: usize,
        /// Corner index within the square.
        corner: usize,
    },
    /// The four corners are not a square of the configured side length.
    #[error("square {index} is not a square of the configured side length")]
    NotASquare {
        /// Square index in submission order.
        index: usize,
    },
}

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Puzzle configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(ValidationError),
    /// A value could not be quantized.
    #[error("quantization failed: {0}")]
    Quantization(ValidationError),
    /// Content hash computation failed.
    #[error("content hash failed: {0}")]
    Fingerprint(#[from] FingerprintError),
    /// The duplicate index collaborator failed.
    #[error("submission index error: {0}")]
    Index(String),
}

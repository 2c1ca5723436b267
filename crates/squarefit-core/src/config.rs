use serde::{Deserialize, Serialize};
use squarefit_canonical::{Quantizer, ValidationError};

/// Side length of one square in board pixels.
pub const DEFAULT_SIDE_LENGTH: f64 = 56.0;
/// Fixed-point scale applied to canonical record values.
pub const DEFAULT_QUANT_SCALE: u64 = 1_000_000_000;
/// Direction vectors shorter than this fall back to `(1, 0)`.
pub const DIRECTION_EPSILON: f64 = 1e-9;
/// Decimal places kept in the stored objective value.
pub const OBJECTIVE_PLACES: u32 = 5;
/// Decimal places shown when displaying an objective value.
pub const DISPLAY_PLACES: u32 = 13;
/// Relative tolerance for edge and diagonal lengths of a corner set.
pub const SHAPE_TOLERANCE: f64 = 1e-6;
/// Decimal places corner coordinates are rounded to before submission.
pub const SUBMIT_CORNER_PLACES: u32 = 10;

/// Puzzle domains the pipeline knows how to validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleDomain {
    /// Unit squares, free rotation, bounding square container.
    #[default]
    SquarePackingRotatable,
}

impl PuzzleDomain {
    /// Stable wire name of the domain.
    pub fn as_str(self) -> &'static str {
        match self {
            PuzzleDomain::SquarePackingRotatable => "square_packing_rotatable",
        }
    }

    /// Hashing domain separator for content hashes in this puzzle domain.
    pub fn hash_domain(self) -> &'static str {
        match self {
            PuzzleDomain::SquarePackingRotatable => "squarefit:square_packing_rotatable:v1",
        }
    }
}

/// Per-instance puzzle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Side length shared by every square, in board pixels.
    pub side_length: f64,
    /// Integer scale for quantized canonical values.
    pub quant_scale: u64,
    /// Puzzle domain.
    pub domain: PuzzleDomain,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            side_length: DEFAULT_SIDE_LENGTH,
            quant_scale: DEFAULT_QUANT_SCALE,
            domain: PuzzleDomain::default(),
        }
    }
}

impl PuzzleConfig {
    /// Builds a validated configuration for the default domain.
    pub fn new(side_length: f64, quant_scale: u64) -> Result<Self, ValidationError> {
        let config = Self {
            side_length,
            quant_scale,
            domain: PuzzleDomain::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the side length is positive and finite and the scale fits in `i64`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.side_length.is_finite() || self.side_length <= 0.0 {
            return Err(ValidationError::OutOfBounds {
                field: "side_length",
                value: self.side_length.to_string(),
            });
        }
        self.quantizer().map(|_| ())
    }

    /// Quantizer for this configuration's scale.
    pub fn quantizer(&self) -> Result<Quantizer, ValidationError> {
        Quantizer::new(self.quant_scale)
    }
}

//! Bounding square and objective value.

use serde::{Deserialize, Serialize};
use squarefit_canonical::{round_to_places, Quantity, ValidationError};

use crate::config::{DISPLAY_PLACES, OBJECTIVE_PLACES};
use crate::geometry::{rotated_corners, Bounds, CornerSet, Placement};

/// Axis-aligned bounds of a placed square with its own side length.
pub fn rotated_bounds(placement: &Placement, side: f64) -> Bounds {
    let corners = rotated_corners(placement.center(side), side, placement.rotation);
    Bounds::of_points(corners).unwrap_or_default()
}

/// Running bounds over every corner of every square. Empty input yields zero bounds.
pub fn packing_bounds(packing: &[CornerSet]) -> Bounds {
    Bounds::of_points(packing.iter().flat_map(|c| c.corners().iter().copied())).unwrap_or_default()
}

/// Side of the smallest axis-aligned bounding square, in units of the square side.
///
/// Ranked ascending: smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ObjectiveValue {
    /// Rounded to 5 decimal places; used for storage and comparison.
    pub value: f64,
    /// Rounded to 13 decimal places; used for display.
    pub precise: f64,
}

impl ObjectiveValue {
    /// Builds an objective value from an unrounded ratio.
    pub fn from_raw(raw: f64) -> Self {
        Self {
            value: round_to_places(raw, OBJECTIVE_PLACES),
            precise: round_to_places(raw, DISPLAY_PLACES),
        }
    }

    /// Display string with up to 13 decimals and trailing zeros trimmed.
    pub fn display(&self) -> String {
        let text = format!("{:.*}", DISPLAY_PLACES as usize, self.precise);
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Exact fixed-point encoding of the stored value, suitable as a dedup key.
    pub fn to_quantity(&self) -> Result<Quantity, ValidationError> {
        Quantity::dec_from_f64(self.value, OBJECTIVE_PLACES)
    }
}

/// `max(width, height) / side` of the given bounds.
pub fn objective_value(bounds: &Bounds, side: f64) -> ObjectiveValue {
    ObjectiveValue::from_raw(bounds.width().max(bounds.height()) / side)
}

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

const DECIMAL_SCALE_MAX: u32 = 18;

/// Exact numeric quantities for canonical records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Quantity {
    /// Fixed-point decimal (`Dec`): value = `m / 10^s`.
    #[serde(rename = "dec")]
    Dec {
        /// Signed base-10 mantissa (no leading zeros; `"-0"` forbidden).
        m: String,
        /// Non-negative scale, at most 18.
        s: u32,
    },
    /// Integer quantity (`Int`).
    #[serde(rename = "int")]
    Int {
        /// Signed integer string (no leading zeros except `"0"`).
        v: String,
    },
}

impl Quantity {
    /// Constructs a validated decimal quantity.
    pub fn dec(mantissa: impl Into<String>, scale: u32) -> Result<Self, ValidationError> {
        let mantissa = mantissa.into();
        if scale > DECIMAL_SCALE_MAX {
            return Err(ValidationError::OutOfBounds {
                field: "scale",
                value: scale.to_string(),
            });
        }
        if !is_valid_integer(&mantissa) {
            return Err(ValidationError::PatternMismatch {
                field: "mantissa",
                value: mantissa,
            });
        }
        Ok(Quantity::Dec {
            m: mantissa,
            s: scale,
        })
    }

    /// Constructs a validated integer quantity.
    pub fn int(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_integer(&value) {
            return Err(ValidationError::PatternMismatch {
                field: "int",
                value,
            });
        }
        Ok(Quantity::Int { v: value })
    }

    /// Rounds a float to `scale` decimal places and encodes it exactly.
    pub fn dec_from_f64(value: f64, scale: u32) -> Result<Self, ValidationError> {
        if scale > DECIMAL_SCALE_MAX {
            return Err(ValidationError::OutOfBounds {
                field: "scale",
                value: scale.to_string(),
            });
        }
        let mantissa = scaled_to_i64(value * 10f64.powi(scale as i32), "dec")?;
        Self::dec(mantissa.to_string(), scale)
    }

    /// Approximate floating point value of the quantity.
    pub fn to_f64(&self) -> f64 {
        match self {
            Quantity::Dec { m, s } => {
                m.parse::<f64>().unwrap_or(f64::NAN) / 10f64.powi(*s as i32)
            }
            Quantity::Int { v } => v.parse::<f64>().unwrap_or(f64::NAN),
        }
    }
}

/// Fixed-point quantizer: maps reals to integers via `round(value * scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    scale: u64,
}

impl Quantizer {
    /// Creates a quantizer; the scale must be positive and below `2^63`.
    pub fn new(scale: u64) -> Result<Self, ValidationError> {
        // a unit component of 1.0 must still quantize into i64
        if scale == 0 || scale as f64 >= i64::MAX as f64 {
            return Err(ValidationError::OutOfBounds {
                field: "quant_scale",
                value: scale.to_string(),
            });
        }
        Ok(Self { scale })
    }

    /// Integer scale factor.
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Largest magnitude that quantizes without overflowing `i64`.
    pub fn max_magnitude(&self) -> f64 {
        i64::MAX as f64 / self.scale as f64
    }

    /// Quantizes a finite value, half away from zero.
    pub fn quantize(&self, value: f64) -> Result<i64, ValidationError> {
        scaled_to_i64(value * self.scale as f64, "quantized")
    }

    /// Maps a quantized integer back to its real value.
    pub fn dequantize(&self, quantized: i64) -> f64 {
        quantized as f64 / self.scale as f64
    }
}

/// Rounds `value` to `places` decimal places.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    if places == 0 {
        return value.round();
    }
    let p = 10f64.powi(places as i32);
    (value * p).round() / p
}

fn scaled_to_i64(scaled: f64, field: &'static str) -> Result<i64, ValidationError> {
    let rounded = scaled.round();
    // 2^63 is exactly representable; anything at or beyond it overflows.
    if !rounded.is_finite() || rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
        return Err(ValidationError::OutOfBounds {
            field,
            value: scaled.to_string(),
        });
    }
    // -0.0 casts to 0, so "-0" never reaches a mantissa.
    Ok(rounded as i64)
}

fn is_valid_integer(value: &str) -> bool {
    if value == "0" {
        return true;
    }
    if value == "-0" {
        return false;
    }
    let re = Regex::new(r"^-?[1-9][0-9]*$").expect("invalid regex");
    re.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_from_f64_rounds() {
        let q = Quantity::dec_from_f64(116.0 / 56.0, 5).unwrap();
        assert_eq!(
            q,
            Quantity::Dec {
                m: "207143".into(),
                s: 5
            }
        );
        assert!((q.to_f64() - 2.07143).abs() < 1e-12);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let q = Quantity::dec_from_f64(-0.000001, 2).unwrap();
        assert_eq!(q, Quantity::Dec { m: "0".into(), s: 2 });
    }

    #[test]
    fn rejects_malformed_mantissa() {
        assert!(Quantity::dec("-0", 1).is_err());
        assert!(Quantity::dec("007", 1).is_err());
        assert!(Quantity::dec("1", 19).is_err());
        assert!(Quantity::int("12a").is_err());
    }

    #[test]
    fn quantizer_round_trip_within_resolution() {
        let q = Quantizer::new(1_000_000_000).unwrap();
        for value in [0.0, 28.0, -3.25, 5123.456789123, 0.7071067811865476] {
            let back = q.dequantize(q.quantize(value).unwrap());
            assert!((back - value).abs() <= 1.0 / 1e9, "{value} -> {back}");
        }
    }

    #[test]
    fn quantizer_rejects_overflow() {
        let q = Quantizer::new(1_000_000_000).unwrap();
        assert!(q.quantize(1e12).is_err());
        assert!(q.quantize(f64::NAN).is_err());
        assert!(q.quantize(q.max_magnitude() * 0.5).is_ok());
    }

    #[test]
    fn scale_must_fit_i64() {
        assert!(Quantizer::new(0).is_err());
        assert!(Quantizer::new(i64::MAX as u64).is_err());
        let widest = Quantizer::new(1 << 62).unwrap();
        assert_eq!(widest.quantize(-1.0).unwrap(), -(1 << 62));
        assert_eq!(widest.quantize(1.0).unwrap(), 1 << 62);
    }

    #[test]
    fn rounding_places() {
        assert_eq!(round_to_places(1.234567, 2), 1.23);
        assert_eq!(round_to_places(2.5, 0), 3.0);
    }
}

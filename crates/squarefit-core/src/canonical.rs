//! Quantized canonical records and content hashes.
//!
//! Squares keep their submission order. Two packings that differ only in
//! the order squares were listed produce different records and different
//! hashes; no spatial sorting is applied.

use serde::{Deserialize, Serialize};
use squarefit_canonical::{
    compute_fingerprint, verify_fingerprint, Canonicalizer, Digest, FingerprintError, Quantizer,
    ValidationError,
};

use crate::config::PuzzleDomain;
use crate::geometry::{centroid_and_direction, CornerSet};

/// One square of a canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSquare {
    /// Centroid x in board pixels.
    pub cx: f64,
    /// Centroid y in board pixels.
    pub cy: f64,
    /// Unit direction x.
    pub ux: f64,
    /// Unit direction y.
    pub uy: f64,
    /// `round(cx * quant_scale)`.
    pub cx_q: i64,
    /// `round(cy * quant_scale)`.
    pub cy_q: i64,
    /// `round(ux * quant_scale)`.
    pub ux_q: i64,
    /// `round(uy * quant_scale)`.
    pub uy_q: i64,
}

/// Order-preserving numeric projection of a packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Scale the quantized fields were produced with.
    pub quant_scale: u64,
    /// One entry per square, in submission order.
    pub squares: Vec<CanonicalSquare>,
}

/// The part of a record that is hashed: only exact integers.
#[derive(Serialize)]
struct HashPayload<'a> {
    domain: &'a str,
    quant_scale: u64,
    squares: Vec<[i64; 4]>,
}

impl CanonicalRecord {
    /// Number of squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// True when the record has no squares.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    fn hash_payload(&self, domain: PuzzleDomain) -> HashPayload<'static> {
        HashPayload {
            domain: domain.as_str(),
            quant_scale: self.quant_scale,
            squares: self
                .squares
                .iter()
                .map(|s| [s.cx_q, s.cy_q, s.ux_q, s.uy_q])
                .collect(),
        }
    }
}

/// Projects a packing into its canonical record.
///
/// Fails only when a value is too large to quantize with `quantizer`.
pub fn to_canonical(
    packing: &[CornerSet],
    quantizer: &Quantizer,
) -> Result<CanonicalRecord, ValidationError> {
    let squares = packing
        .iter()
        .map(|corners| -> Result<CanonicalSquare, ValidationError> {
            let pose = centroid_and_direction(corners);
            Ok(CanonicalSquare {
                cx: pose.cx,
                cy: pose.cy,
                ux: pose.ux,
                uy: pose.uy,
                cx_q: quantizer.quantize(pose.cx)?,
                cy_q: quantizer.quantize(pose.cy)?,
                ux_q: quantizer.quantize(pose.ux)?,
                uy_q: quantizer.quantize(pose.uy)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CanonicalRecord {
        quant_scale: quantizer.scale(),
        squares,
    })
}

/// SHA-256 fingerprint of a record's quantized values.
///
/// Floats are excluded; the quantized integers alone determine the hash, so
/// it is reproducible on any platform that quantizes the same way.
pub fn content_hash(
    record: &CanonicalRecord,
    domain: PuzzleDomain,
    canonicalizer: &Canonicalizer,
) -> Result<Digest, FingerprintError> {
    compute_fingerprint(
        &record.hash_payload(domain),
        domain.hash_domain(),
        canonicalizer,
    )
}

/// Recomputes a record's hash and compares it with `claimed`.
pub fn verify_content_hash(
    record: &CanonicalRecord,
    domain: PuzzleDomain,
    claimed: &Digest,
    canonicalizer: &Canonicalizer,
) -> Result<bool, FingerprintError> {
    verify_fingerprint(
        &record.hash_payload(domain),
        domain.hash_domain(),
        claimed,
        canonicalizer,
    )
}

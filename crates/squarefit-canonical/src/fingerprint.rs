//! Content fingerprints with domain-separated hashing.
//!
//! Fingerprints are computed as `sha256(domain || 0x00 || canonical_bytes(value))`.
//! Every JSON number is converted to its decimal string before
//! canonicalization so integers beyond 2^53 survive every JSON reader intact.

use crate::{Canonicalizer, Digest, DigestAlg};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

/// Computes the fingerprint of `value` under the given hashing domain.
///
/// The domain keeps fingerprints of different record kinds from colliding
/// even when their canonical bytes match.
///
/// # Example
///
/// ```rust
/// use squarefit_canonical::{compute_fingerprint, Canonicalizer, ProfileId};
/// use serde_json::json;
///
/// let canonicalizer = Canonicalizer::new(ProfileId::parse("squarefit-canonical-v1")?);
/// let record = json!({"squares": [["28000000000", "28000000000", "707106781", "-707106781"]]});
///
/// let digest = compute_fingerprint(&record, "squarefit:packing:v1", &canonicalizer)?;
/// assert_eq!(digest.to_bytes()?.len(), 32);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`FingerprintError`] if serialization or canonicalization fails.
pub fn compute_fingerprint<T: Serialize>(
    value: &T,
    domain: &str,
    canonicalizer: &Canonicalizer,
) -> Result<Digest, FingerprintError> {
    let mut value: Value =
        serde_json::to_value(value).map_err(|e| FingerprintError::Serialization(e.to_string()))?;

    stringify_numbers(&mut value);

    let bytes = canonicalizer.canonicalize(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update([0u8]);
    hasher.update(&bytes);
    let hash_bytes = hasher.finalize();

    Ok(Digest::from_bytes(DigestAlg::Sha256, &hash_bytes)?)
}

/// Error during fingerprint computation.
#[derive(thiserror::Error, Debug)]
pub enum FingerprintError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] crate::ValidationError),
}

/// Recursively converts all JSON numbers into strings.
fn stringify_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v);
            }
        }
        _ => {}
    }
}

/// Verifies that a claimed fingerprint matches the recomputed one.
///
/// # Errors
///
/// Returns [`FingerprintError`] if computation fails.
pub fn verify_fingerprint<T: Serialize>(
    value: &T,
    domain: &str,
    claimed: &Digest,
    canonicalizer: &Canonicalizer,
) -> Result<bool, FingerprintError> {
    let computed = compute_fingerprint(value, domain, canonicalizer)?;
    Ok(claimed == &computed)
}

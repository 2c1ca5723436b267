//! Canonical encoding primitives for square-packing records.
//!
//! Everything that participates in a content hash lives in this crate:
//! RFC 8785 canonical JSON bytes, SHA-256 digests, domain-separated
//! fingerprints, and the fixed-point quantities used to make floating
//! point coordinates reproducible.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Digest primitives.
pub mod digest;
/// Domain-separated content fingerprints.
pub mod fingerprint;
/// Identifier newtypes.
pub mod identifiers;
/// Fixed-point quantities and quantization.
pub mod quantities;
/// Validation errors shared by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use digest::{Digest, DigestAlg};
pub use fingerprint::{compute_fingerprint, verify_fingerprint, FingerprintError};
pub use identifiers::{InstanceId, ProfileId};
pub use quantities::{round_to_places, Quantity, Quantizer};
pub use validation::ValidationError;

//! Validator and scorer for square-packing submissions.
//!
//! This crate provides:
//! - A geometry kernel turning square placements into corner sets and back
//! - Separating-axis collision detection between squares
//! - The bounding-square objective (smaller is better)
//! - Quantized canonical records and content hashes for deduplication
//! - A validation pipeline tying the above together
//!
//! Core invariants:
//! - Every operation is a pure function of its inputs; no state survives a call
//! - Square order is preserved end to end, so hashes are order-sensitive
//! - Rejections are values, not errors; errors mean misconfiguration or a
//!   failing collaborator
//!
#![deny(missing_docs)]

/// Bounding square and objective value.
pub mod bounds;
/// Quantized canonical records and content hashes.
pub mod canonical;
/// Separating-axis collision detection.
pub mod collision;
/// Puzzle configuration and domains.
pub mod config;
/// Error types.
pub mod errors;
/// Corner sets, placements, and poses.
pub mod geometry;
/// Duplicate-submission index collaborator.
pub mod index;
/// Validation pipeline and verdicts.
pub mod pipeline;

pub use bounds::{objective_value, packing_bounds, rotated_bounds, ObjectiveValue};
pub use canonical::{content_hash, to_canonical, CanonicalRecord, CanonicalSquare};
pub use collision::{all_collisions, overlaps, CollisionReport};
pub use config::{PuzzleConfig, PuzzleDomain};
pub use errors::{CoreError, MalformedInput};
pub use geometry::{
    axis_aligned_bounds, centroid_and_direction, corners_from_placement, Bounds, CornerSet,
    Placement, Point, Pose,
};
pub use index::{IndexError, MemoryIndex, SubmissionIndex};
pub use pipeline::{
    validate_packing, AcceptedPacking, DuplicateKey, PackingValidator, RejectReason, Rejection,
    Verdict,
};

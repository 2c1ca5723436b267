//! Validation pipeline: malformed → collision → duplicate → accepted.
//!
//! Each stage is terminal on failure and no stage is retried. The pipeline
//! owns no state between calls; a [`PackingValidator`] is an immutable value
//! the caller constructs and may share across threads.

use serde::Serialize;
use squarefit_canonical::{Canonicalizer, Digest, InstanceId, ProfileId, Quantizer};

use crate::bounds::{objective_value, packing_bounds, ObjectiveValue};
use crate::canonical::{content_hash, to_canonical, CanonicalRecord};
use crate::collision::all_collisions;
use crate::config::{PuzzleConfig, PuzzleDomain, SHAPE_TOLERANCE};
use crate::errors::{CoreError, MalformedInput};
use crate::geometry::{corners_from_placement, Bounds, CornerSet, Placement, Point};
use crate::index::SubmissionIndex;

/// Canonicalization profile used for content hashes.
const CANONICAL_PROFILE: &str = "squarefit-canonical-v1";

/// Machine-checkable rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Input is not a non-empty sequence of finite four-corner squares.
    Malformed,
    /// At least two squares overlap.
    Collision,
    /// An equivalent submission already exists for the instance.
    Duplicate,
}

/// A rejected submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Why the submission was rejected.
    pub reason: RejectReason,
    /// Overlapping pairs; empty unless `reason` is `Collision`.
    pub colliding_pairs: Vec<(usize, usize)>,
    /// Human-readable detail for rendering a message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything the persistence layer needs to store an accepted packing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedPacking {
    /// Number of squares.
    pub square_count: usize,
    /// Bounding-square objective.
    pub objective_value: ObjectiveValue,
    /// Bounds the objective was computed from.
    pub bounds: Bounds,
    /// Quantized canonical record.
    pub canonical_record: CanonicalRecord,
    /// SHA-256 over the record's quantized values.
    pub content_hash: Digest,
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Submission passed every stage.
    Accepted(AcceptedPacking),
    /// Submission failed a stage.
    Rejected(Rejection),
}

impl Verdict {
    /// True for `Accepted`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    /// The accepted packing, if any.
    pub fn accepted(&self) -> Option<&AcceptedPacking> {
        match self {
            Verdict::Accepted(accepted) => Some(accepted),
            Verdict::Rejected(_) => None,
        }
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accepted(_) => None,
            Verdict::Rejected(rejection) => Some(rejection),
        }
    }

    fn malformed(err: MalformedInput) -> Self {
        log::debug!("rejected malformed packing: {err}");
        Verdict::Rejected(Rejection {
            reason: RejectReason::Malformed,
            colliding_pairs: Vec::new(),
            detail: Some(err.to_string()),
        })
    }
}

/// Key the duplicate stage compares against the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKey {
    /// Same square count and same 5-decimal objective value.
    #[default]
    ObjectiveValue,
    /// Same content hash.
    ContentHash,
}

/// Caller-owned validator for one puzzle configuration.
#[derive(Debug, Clone)]
pub struct PackingValidator {
    config: PuzzleConfig,
    quantizer: Quantizer,
    canonicalizer: Canonicalizer,
    duplicate_key: DuplicateKey,
}

impl PackingValidator {
    /// Builds a validator, rejecting invalid configurations.
    pub fn new(config: PuzzleConfig) -> Result<Self, CoreError> {
        config.validate().map_err(CoreError::Config)?;
        let quantizer = config.quantizer().map_err(CoreError::Config)?;
        let profile = ProfileId::parse(CANONICAL_PROFILE).map_err(CoreError::Config)?;
        Ok(Self {
            config,
            quantizer,
            canonicalizer: Canonicalizer::new(profile),
            duplicate_key: DuplicateKey::default(),
        })
    }

    /// Selects the key used by [`PackingValidator::validate_against`].
    pub fn with_duplicate_key(mut self, key: DuplicateKey) -> Self {
        self.duplicate_key = key;
        self
    }

    /// Configuration this validator was built with.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Canonicalizer used for content hashes.
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Key the duplicate stage compares against.
    pub fn duplicate_key(&self) -> DuplicateKey {
        self.duplicate_key
    }

    /// Runs the malformed and collision stages and scores the packing.
    pub fn validate(&self, corner_sets: &[Vec<Point>]) -> Result<Verdict, CoreError> {
        match self.config.domain {
            PuzzleDomain::SquarePackingRotatable => self.validate_squares(corner_sets),
        }
    }

    /// Converts placements with the configured side length, then validates.
    pub fn validate_placements(&self, placements: &[Placement]) -> Result<Verdict, CoreError> {
        let corner_sets: Vec<Vec<Point>> = placements
            .iter()
            .map(|p| corners_from_placement(p, self.config.side_length).0.to_vec())
            .collect();
        self.validate(&corner_sets)
    }

    /// Full pipeline including the duplicate stage against `index`.
    pub fn validate_against<I: SubmissionIndex>(
        &self,
        corner_sets: &[Vec<Point>],
        instance: &InstanceId,
        index: &I,
    ) -> Result<Verdict, CoreError> {
        let verdict = self.validate(corner_sets)?;
        let Some(accepted) = verdict.accepted() else {
            return Ok(verdict);
        };
        let exists = match self.duplicate_key {
            DuplicateKey::ObjectiveValue => {
                let objective = accepted
                    .objective_value
                    .to_quantity()
                    .map_err(CoreError::Quantization)?;
                index.exists(instance, accepted.square_count, &objective)
            }
            DuplicateKey::ContentHash => index.exists_hash(instance, &accepted.content_hash),
        }
        .map_err(|e| CoreError::Index(e.to_string()))?;
        if !exists {
            return Ok(verdict);
        }
        log::debug!(
            "rejected duplicate packing for {instance}: n={} s={}",
            accepted.square_count,
            accepted.objective_value.display()
        );
        Ok(Verdict::Rejected(Rejection {
            reason: RejectReason::Duplicate,
            colliding_pairs: Vec::new(),
            detail: Some(format!(
                "a solution with s = {:.5} for {} squares already exists",
                accepted.objective_value.value, accepted.square_count
            )),
        }))
    }

    fn validate_squares(&self, corner_sets: &[Vec<Point>]) -> Result<Verdict, CoreError> {
        let packing = match self.check_structure(corner_sets) {
            Ok(packing) => packing,
            Err(err) => return Ok(Verdict::malformed(err)),
        };

        let side = self.config.side_length;
        let collisions = all_collisions(&packing, side);
        if collisions.any() {
            log::debug!("rejected colliding packing: pairs {:?}", collisions.pairs);
            return Ok(Verdict::Rejected(Rejection {
                reason: RejectReason::Collision,
                detail: Some(format!("{} overlapping pair(s)", collisions.pairs.len())),
                colliding_pairs: collisions.pairs,
            }));
        }

        let bounds = packing_bounds(&packing);
        let objective = objective_value(&bounds, side);
        let canonical_record =
            to_canonical(&packing, &self.quantizer).map_err(CoreError::Quantization)?;
        let hash = content_hash(&canonical_record, self.config.domain, &self.canonicalizer)?;
        log::debug!(
            "accepted packing: n={} s={} hash={}",
            packing.len(),
            objective.display(),
            hash
        );
        Ok(Verdict::Accepted(AcceptedPacking {
            square_count: packing.len(),
            objective_value: objective,
            bounds,
            canonical_record,
            content_hash: hash,
        }))
    }

    fn check_structure(&self, corner_sets: &[Vec<Point>]) -> Result<Vec<CornerSet>, MalformedInput> {
        if corner_sets.is_empty() {
            return Err(MalformedInput::Empty);
        }
        let limit = self.quantizer.max_magnitude();
        corner_sets
            .iter()
            .enumerate()
            .map(|(index, points)| -> Result<CornerSet, MalformedInput> {
                let corners = CornerSet::try_from(points.as_slice())
                    .map_err(|found| MalformedInput::WrongArity { index, found })?;
                for (corner, p) in corners.corners().iter().enumerate() {
                    if !p.is_finite() {
                        return Err(MalformedInput::NonFinite { index, corner });
                    }
                    if p.x.abs() >= limit || p.y.abs() >= limit {
                        return Err(MalformedInput::OutOfRange { index, corner });
                    }
                }
                if !corners.is_square_of_side(self.config.side_length, SHAPE_TOLERANCE) {
                    return Err(MalformedInput::NotASquare { index });
                }
                Ok(corners)
            })
            .collect()
    }
}

/// One-shot entry point: validate `corner_sets` with the given side length and scale.
pub fn validate_packing(
    corner_sets: &[Vec<Point>],
    side_length: f64,
    quant_scale: u64,
) -> Result<Verdict, CoreError> {
    let config = PuzzleConfig::new(side_length, quant_scale).map_err(CoreError::Config)?;
    PackingValidator::new(config)?.validate(corner_sets)
}

//! Duplicate-submission index.
//!
//! Persistence lives outside this crate. The pipeline only needs a
//! predicate telling it whether an equivalent submission already exists
//! for the same puzzle instance; [`SubmissionIndex`] is that seam.

use std::collections::HashSet;
use std::sync::Mutex;

use squarefit_canonical::{Digest, InstanceId, Quantity};
use thiserror::Error;

use crate::pipeline::DuplicateKey;

/// Lookup used by the duplicate stage of the pipeline.
pub trait SubmissionIndex {
    /// Error returned by the backing store.
    type Error: std::fmt::Display;

    /// True if a submission with this square count and objective exists.
    fn exists(
        &self,
        instance: &InstanceId,
        square_count: usize,
        objective: &Quantity,
    ) -> Result<bool, Self::Error>;

    /// True if a submission with this content hash exists.
    fn exists_hash(&self, instance: &InstanceId, hash: &Digest) -> Result<bool, Self::Error>;
}

/// Errors from [`MemoryIndex`].
#[derive(Error, Debug)]
pub enum IndexError {
    /// A thread panicked while holding the index lock.
    #[error("index lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default)]
struct IndexState {
    objectives: HashSet<(InstanceId, usize, Quantity)>,
    hashes: HashSet<(InstanceId, Digest)>,
}

/// In-process index keyed by instance.
///
/// `claim` checks the selected key and records both keys under one lock,
/// so two racing submissions cannot both claim the same key.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    state: Mutex<IndexState>,
}

impl MemoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submission unless `key` is already taken for `instance`.
    ///
    /// Only the selected key decides; both keys are stored on success so
    /// later lookups under either key see the submission. Returns `true`
    /// if the submission was recorded.
    pub fn claim(
        &self,
        instance: &InstanceId,
        key: DuplicateKey,
        square_count: usize,
        objective: &Quantity,
        hash: &Digest,
    ) -> Result<bool, IndexError> {
        let mut state = self.state.lock().map_err(|_| IndexError::Poisoned)?;
        let objective_key = (instance.clone(), square_count, objective.clone());
        let hash_key = (instance.clone(), hash.clone());
        let taken = match key {
            DuplicateKey::ObjectiveValue => state.objectives.contains(&objective_key),
            DuplicateKey::ContentHash => state.hashes.contains(&hash_key),
        };
        if taken {
            return Ok(false);
        }
        state.objectives.insert(objective_key);
        state.hashes.insert(hash_key);
        Ok(true)
    }

    /// Number of distinct recorded layouts.
    pub fn len(&self) -> Result<usize, IndexError> {
        let state = self.state.lock().map_err(|_| IndexError::Poisoned)?;
        Ok(state.hashes.len())
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> Result<bool, IndexError> {
        Ok(self.len()? == 0)
    }
}

impl SubmissionIndex for MemoryIndex {
    type Error = IndexError;

    fn exists(
        &self,
        instance: &InstanceId,
        square_count: usize,
        objective: &Quantity,
    ) -> Result<bool, Self::Error> {
        let state = self.state.lock().map_err(|_| IndexError::Poisoned)?;
        Ok(state
            .objectives
            .contains(&(instance.clone(), square_count, objective.clone())))
    }

    fn exists_hash(&self, instance: &InstanceId, hash: &Digest) -> Result<bool, Self::Error> {
        let state = self.state.lock().map_err(|_| IndexError::Poisoned)?;
        Ok(state.hashes.contains(&(instance.clone(), hash.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squarefit_canonical::DigestAlg;
    use std::sync::Arc;
    use std::thread;

    fn instance(name: &str) -> InstanceId {
        InstanceId::parse(name).unwrap()
    }

    fn digest(byte: u8) -> Digest {
        Digest::from_bytes(DigestAlg::Sha256, &[byte; 32]).unwrap()
    }

    #[test]
    fn claim_then_exists() {
        let index = MemoryIndex::new();
        let fit = instance("fit");
        let objective = Quantity::dec("200000", 5).unwrap();
        assert!(!index.exists(&fit, 4, &objective).unwrap());
        let key = DuplicateKey::ObjectiveValue;
        assert!(index.is_empty().unwrap());
        assert!(index.claim(&fit, key, 4, &objective, &digest(1)).unwrap());
        assert!(index.exists(&fit, 4, &objective).unwrap());
        assert!(index.exists_hash(&fit, &digest(1)).unwrap());
        assert!(!index.exists(&fit, 5, &objective).unwrap());
        assert!(!index.exists(&instance("other"), 4, &objective).unwrap());
        assert!(!index.claim(&fit, key, 4, &objective, &digest(2)).unwrap());
        assert_eq!(index.len().unwrap(), 1);
    }

    #[test]
    fn hash_claims_ignore_shared_objective() {
        let index = MemoryIndex::new();
        let fit = instance("fit");
        let key = DuplicateKey::ContentHash;
        let objective = Quantity::dec("207143", 5).unwrap();
        assert!(index.claim(&fit, key, 2, &objective, &digest(1)).unwrap());
        assert!(index.claim(&fit, key, 2, &objective, &digest(2)).unwrap());
        assert!(index.exists_hash(&fit, &digest(2)).unwrap());
        assert!(!index.claim(&fit, key, 2, &objective, &digest(2)).unwrap());
        assert_eq!(index.len().unwrap(), 2);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let index = Arc::new(MemoryIndex::new());
        let poisoner = Arc::clone(&index);
        let _ = thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the index lock");
        })
        .join();
        assert!(matches!(index.len(), Err(IndexError::Poisoned)));
        assert!(matches!(index.is_empty(), Err(IndexError::Poisoned)));
    }

    #[test]
    fn concurrent_claims_admit_one() {
        let index = Arc::new(MemoryIndex::new());
        let objective = Quantity::dec("141421", 5).unwrap();
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let index = Arc::clone(&index);
                let objective = objective.clone();
                thread::spawn(move || {
                    index
                        .claim(
                            &instance("fit"),
                            DuplicateKey::ObjectiveValue,
                            1,
                            &objective,
                            &digest(i),
                        )
                        .unwrap()
                })
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(index.len().unwrap(), 1);
    }
}

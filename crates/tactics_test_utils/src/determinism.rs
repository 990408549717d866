//! Determinism testing utilities.
//!
//! Provides a harness for verifying that encounters produce identical
//! results given identical inputs.
//!
//! # Testing Strategy
//!
//! Turn resolution must be reproducible so that replays and tests can
//! compare state hashes. Sources of non-determinism include:
//!
//! - **Floating-point math**: scores use [`tactics_core::math::Fixed`].
//!
//! - **Hash iteration order**: actors live in a `BTreeMap` and are always
//!   processed in ascending id order.
//!
//! - **Randomness**: the core has none.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: individual calculators and resolvers
//! 2. **Property tests**: random grids and squads still replay identically
//! 3. **Parallel tests**: encounters on separate threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use tactics_core::orchestrator::Encounter;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of turns played per run.
    pub turns: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic encounter).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Encounter is non-deterministic!\n\
                 Runs: {}\n\
                 Turns: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.turns,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a state machine multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to replay
/// * `turns` - Number of steps per run
/// * `setup` - Creates the initial state
/// * `step` - Advances the state by one turn
/// * `hash` - Computes the state hash
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    turns: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..turns {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        turns,
    }
}

/// Play an encounter twice from identical setups and compare final hashes.
pub fn verify_encounter_determinism<F>(setup_fn: F, turns: u64) -> DeterminismResult
where
    F: Fn() -> Encounter,
{
    verify_determinism(
        2,
        turns,
        &setup_fn,
        |enc| {
            enc.run_turn();
        },
        Encounter::state_hash,
    )
}

/// Play `count` encounters on scoped threads and collect final hashes.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn run_parallel_encounters<F>(setup_fn: F, count: usize, turns: u64) -> DeterminismResult
where
    F: Fn() -> Encounter + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..count)
            .map(|_| {
                s.spawn(|| {
                    let mut enc = setup_fn();
                    for _ in 0..turns {
                        enc.run_turn();
                    }
                    enc.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("encounter thread panicked"))
            .collect()
    });

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
        turns,
    }
}

/// Replay two encounters turn by turn and report the first turn at which
/// their hashes differ.
///
/// Returns `None` if they never diverge.
pub fn find_first_divergence<F>(setup_fn: F, turns: u64) -> Option<u64>
where
    F: Fn() -> Encounter,
{
    let mut a = setup_fn();
    let mut b = setup_fn();

    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for turn in 1..=turns {
        a.run_turn();
        b.run_turn();

        if a.state_hash() != b.state_hash() {
            return Some(turn);
        }
    }

    None
}

/// Verify that a bincode round trip preserves the encounter hash exactly.
pub fn verify_serialization_determinism<F>(setup_fn: F, turns: u64) -> bool
where
    F: Fn() -> Encounter,
{
    let mut enc = setup_fn();
    for _ in 0..turns {
        enc.run_turn();
    }

    let hash_before = enc.state_hash();
    let Ok(bytes) = enc.serialize() else {
        return false;
    };
    let Ok(restored) = Encounter::deserialize(&bytes) else {
        return false;
    };

    hash_before == restored.state_hash()
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mixed_squad, open_arena};
    use tactics_core::components::Position;

    fn skirmish() -> Encounter {
        let mut enc = open_arena(16, 16, Position::new(8, 8));
        mixed_squad(&mut enc, 6);
        enc
    }

    #[test]
    fn test_verify_determinism_counter() {
        let result = verify_determinism(3, 10, || 0u64, |n| *n += 2, |n| *n);
        assert!(result.is_deterministic);
        assert_eq!(result.hashes, vec![20, 20, 20]);
    }

    #[test]
    fn test_unique_hashes_detects_divergence() {
        let result = DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2, 1],
            turns: 5,
        };
        assert_eq!(result.unique_hashes(), vec![1, 2]);
    }

    #[test]
    fn test_encounter_replays_identically() {
        verify_encounter_determinism(skirmish, 12).assert_deterministic();
        assert_eq!(find_first_divergence(skirmish, 12), None);
    }

    #[test]
    fn test_parallel_encounters_match() {
        run_parallel_encounters(skirmish, 4, 8).assert_deterministic();
    }

    #[test]
    fn test_serialization_round_trip() {
        assert!(verify_serialization_determinism(skirmish, 5));
    }

    #[test]
    fn test_compute_hash_stable() {
        assert_eq!(compute_hash(&(1, 2)), compute_hash(&(1, 2)));
    }
}

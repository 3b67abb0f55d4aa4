//! Two-level attack on autoperm.
//!
//! With `c = σ∘τ⁻¹`, replacing the second letter `y` of every ciphertext pair
//! by `c(y)` leaves a text that is, to a first approximation, a single simple
//! substitution of the plaintext. The outer search looks for `c`; each
//! candidate is judged by how well a nested substitution search can read the
//! converted text.

use super::mutation;
use super::runner::{NoProgress, OptimizationOptions, Optimizer};
use super::substitution::SubstitutionClimber;
use super::{HillClimber, Neighbors};
use crate::alphabet;
use crate::cipher::AutopermKeys;
use crate::consts::ALPHABET_SIZE;
use crate::error::ApResult;
use crate::permutation::Permutation;
use crate::scorer::{FrequencyFit, Metric};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Applies the conversion key to the second letter of every full pair. A
/// dangling last letter is left alone.
pub fn convert_indices(cipher: &[u8], key: &Permutation) -> Vec<u8> {
    let mut converted = cipher.to_vec();
    for second in converted.iter_mut().skip(1).step_by(2) {
        *second = key.apply_index(*second);
    }
    converted
}

/// Finds a conversion key whose converted text has English-like letter
/// frequencies. Cheap; used to seed the nested search.
pub struct ConversionClimber {
    ciphertext: Vec<u8>,
    metric: Arc<dyn Metric>,
    key: Permutation,
    moves: Vec<Permutation>,
    rng: fastrand::Rng,
}

impl ConversionClimber {
    pub fn new(ciphertext: &[u8], metric: Arc<dyn Metric>, seed: Option<u64>) -> ApResult<Self> {
        Ok(Self::from_indices(
            alphabet::to_indices(ciphertext)?,
            metric,
            seed,
        ))
    }

    /// Takes symbol indices, each below 26.
    pub(crate) fn from_indices(ciphertext: Vec<u8>, metric: Arc<dyn Metric>, seed: Option<u64>) -> Self {
        debug_assert!(ciphertext.iter().all(|&i| (i as usize) < ALPHABET_SIZE));
        Self {
            ciphertext,
            metric,
            key: Permutation::identity(),
            moves: mutation::transpositions(),
            rng: mutation::seeded_rng(seed),
        }
    }

    /// Scored by blind English letter frequencies.
    pub(crate) fn english(ciphertext: Vec<u8>, seed: Option<u64>) -> Self {
        Self::from_indices(ciphertext, Arc::new(FrequencyFit::english()), seed)
    }
}

impl HillClimber for ConversionClimber {
    type State = Permutation;

    fn initialize_state(&mut self) {
        self.key = Permutation::random(&mut self.rng);
    }

    fn state(&self) -> &Permutation {
        &self.key
    }

    fn set_state(&mut self, state: Permutation) {
        self.key = state;
    }

    fn neighbors(&mut self) -> Neighbors<Permutation> {
        let order = mutation::shuffled(&mut self.rng, &self.moves);
        Box::new(mutation::right_neighbors(self.key, order))
    }

    fn score(&mut self, state: &Permutation) -> f64 {
        self.metric
            .score_indices(&convert_indices(&self.ciphertext, state))
    }
}

/// Everything the nested search can say about one conversion key.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub conversion_key: Permutation,
    /// Encryption key of the substitution found on the converted text.
    pub substitution_key: Permutation,
    pub plaintext: String,
    pub score: f64,
    /// Key pair suggested by the two keys above. Approximate: the nested
    /// model ignores the per-pair key updates.
    pub implied_keys: AutopermKeys,
}

/// Outer search over conversion keys, scoring each one with a complete inner
/// substitution search.
///
/// The inner result behind the current key is kept, so [`outcome`] reports
/// the same search that produced the outer score.
///
/// [`outcome`]: NestedConversionClimber::outcome
pub struct NestedConversionClimber {
    ciphertext: Vec<u8>,
    metric: Arc<dyn Metric>,
    key: Permutation,
    moves: Vec<Permutation>,
    rng: fastrand::Rng,
    inner_options: OptimizationOptions,
    /// Inner result of the most recently scored candidate.
    last: Option<ConversionOutcome>,
    /// Inner result of `key`, once it has been scored.
    current: Option<ConversionOutcome>,
}

impl NestedConversionClimber {
    /// `metric` scores the inner substitution searches.
    pub fn new(ciphertext: &[u8], metric: Arc<dyn Metric>, seed: Option<u64>) -> ApResult<Self> {
        Ok(Self::from_indices(
            alphabet::to_indices(ciphertext)?,
            metric,
            seed,
        ))
    }

    /// Takes symbol indices, each below 26.
    pub(crate) fn from_indices(ciphertext: Vec<u8>, metric: Arc<dyn Metric>, seed: Option<u64>) -> Self {
        debug_assert!(ciphertext.iter().all(|&i| (i as usize) < ALPHABET_SIZE));
        Self {
            ciphertext,
            metric,
            key: Permutation::identity(),
            moves: mutation::transpositions(),
            rng: mutation::seeded_rng(seed),
            inner_options: OptimizationOptions::default(),
            last: None,
            current: None,
        }
    }

    /// Limits applied to every inner search.
    pub fn with_inner_options(mut self, options: OptimizationOptions) -> Self {
        self.inner_options = options;
        self
    }

    fn inner_search(&mut self, conversion_key: &Permutation) -> ConversionOutcome {
        let converted = convert_indices(&self.ciphertext, conversion_key);
        let inner = SubstitutionClimber::from_indices(
            converted,
            self.metric.clone(),
            Some(self.rng.u64(..)),
        );
        let mut optimizer = Optimizer::new(inner, self.inner_options.clone());
        let result = optimizer.run(&NoProgress);
        let inner = optimizer.climber();
        let substitution_key = inner.encryption_key();

        ConversionOutcome {
            conversion_key: *conversion_key,
            substitution_key,
            plaintext: String::from_utf8_lossy(&inner.plaintext()).into_owned(),
            score: result.score,
            implied_keys: AutopermKeys::new(
                substitution_key,
                conversion_key.inverse().compose(&substitution_key),
            ),
        }
    }

    /// What the nested search found for the current conversion key.
    ///
    /// Reuses the inner search that scored the key; a key that was never
    /// scored gets a fresh one.
    pub fn outcome(&mut self) -> ConversionOutcome {
        let key = self.key;
        if let Some(outcome) = self.current.as_ref().filter(|o| o.conversion_key == key) {
            return outcome.clone();
        }
        let outcome = self.inner_search(&key);
        self.current = Some(outcome.clone());
        outcome
    }
}

impl HillClimber for NestedConversionClimber {
    type State = Permutation;

    /// Starts from a converged frequency-fit conversion search.
    fn initialize_state(&mut self) {
        let seeding = ConversionClimber::english(self.ciphertext.clone(), Some(self.rng.u64(..)));
        let mut optimizer = Optimizer::new(seeding, OptimizationOptions::default());
        let result = optimizer.run(&NoProgress);
        debug!(
            "Frequency-fit seed {} scored {:.6} after {} evaluations",
            result.state, result.score, result.evaluated
        );
        self.key = result.state;
        self.last = None;
        self.current = None;
    }

    fn state(&self) -> &Permutation {
        &self.key
    }

    fn set_state(&mut self, state: Permutation) {
        self.key = state;
        self.current = self
            .last
            .take()
            .filter(|outcome| outcome.conversion_key == state);
    }

    fn neighbors(&mut self) -> Neighbors<Permutation> {
        let order = mutation::shuffled(&mut self.rng, &self.moves);
        Box::new(mutation::right_neighbors(self.key, order))
    }

    fn score(&mut self, state: &Permutation) -> f64 {
        let outcome = self.inner_search(state);
        let score = outcome.score;
        if *state == self.key {
            self.current = Some(outcome);
        } else {
            self.last = Some(outcome);
        }
        score
    }
}

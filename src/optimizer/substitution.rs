use super::mutation;
use super::{HillClimber, Neighbors};
use crate::alphabet;
use crate::cipher::substitution;
use crate::consts::ALPHABET_SIZE;
use crate::error::ApResult;
use crate::permutation::Permutation;
use crate::scorer::Metric;
use std::iter;
use std::sync::Arc;

/// Recovers a simple substitution key.
///
/// The state is the decryption key; the encryption key is its inverse.
pub struct SubstitutionClimber {
    ciphertext: Vec<u8>,
    metric: Arc<dyn Metric>,
    key: Permutation,
    moves: Vec<Permutation>,
    rng: fastrand::Rng,
}

impl SubstitutionClimber {
    /// `ciphertext` is a sequence of symbols `A..Z`.
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

    pub fn encryption_key(&self) -> Permutation {
        self.key.inverse()
    }

    /// The ciphertext decrypted under the current key, as symbols.
    pub fn plaintext(&self) -> Vec<u8> {
        alphabet::to_symbols(&substitution::apply_indices(&self.ciphertext, &self.key))
    }
}

impl HillClimber for SubstitutionClimber {
    type State = Permutation;

    fn initialize_state(&mut self) {
        self.key = mutation::frequency_seed(&self.ciphertext);
    }

    fn state(&self) -> &Permutation {
        &self.key
    }

    fn set_state(&mut self, state: Permutation) {
        self.key = state;
    }

    /// One random key, then every single swap in shuffled order.
    fn neighbors(&mut self) -> Neighbors<Permutation> {
        let escape = Permutation::random(&mut self.rng);
        let order = mutation::shuffled(&mut self.rng, &self.moves);
        Box::new(iter::once(escape).chain(mutation::right_neighbors(self.key, order)))
    }

    fn score(&mut self, state: &Permutation) -> f64 {
        self.metric
            .score_indices(&substitution::apply_indices(&self.ciphertext, state))
    }
}

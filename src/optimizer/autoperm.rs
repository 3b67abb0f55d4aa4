use super::mutation;
use super::{HillClimber, Neighbors};
use crate::alphabet;
use crate::cipher::autoperm::{self, AutopermKeys};
use crate::consts::ALPHABET_SIZE;
use crate::error::ApResult;
use crate::permutation::Permutation;
use crate::scorer::Metric;
use std::iter;
use std::sync::Arc;

/// Searches for the key pair directly, decrypting the whole ciphertext for
/// every candidate.
pub struct AutopermClimber {
    ciphertext: Vec<u8>,
    metric: Arc<dyn Metric>,
    keys: AutopermKeys,
    moves: Vec<Permutation>,
    rng: fastrand::Rng,
}

impl AutopermClimber {
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
            keys: AutopermKeys::default(),
            moves: mutation::transpositions(),
            rng: mutation::seeded_rng(seed),
        }
    }

    pub fn plaintext(&self) -> Vec<u8> {
        alphabet::to_symbols(&autoperm::decrypt_indices(&self.ciphertext, &self.keys))
    }
}

impl HillClimber for AutopermClimber {
    type State = AutopermKeys;

    fn initialize_state(&mut self) {
        self.keys = AutopermKeys::random(&mut self.rng);
    }

    fn state(&self) -> &AutopermKeys {
        &self.keys
    }

    fn set_state(&mut self, state: AutopermKeys) {
        self.keys = state;
    }

    /// A random pair, then every swap applied to σ, then every swap applied
    /// to τ, each half in its own shuffled order.
    fn neighbors(&mut self) -> Neighbors<AutopermKeys> {
        let escape = AutopermKeys::random(&mut self.rng);
        let sigma_order = mutation::shuffled(&mut self.rng, &self.moves);
        let tau_order = mutation::shuffled(&mut self.rng, &self.moves);
        let AutopermKeys { sigma, tau } = self.keys;

        let sigma_moves = mutation::right_neighbors(sigma, sigma_order)
            .map(move |s| AutopermKeys::new(s, tau));
        let tau_moves = mutation::right_neighbors(tau, tau_order)
            .map(move |t| AutopermKeys::new(sigma, t));

        Box::new(iter::once(escape).chain(sigma_moves).chain(tau_moves))
    }

    fn score(&mut self, state: &AutopermKeys) -> f64 {
        self.metric
            .score_indices(&autoperm::decrypt_indices(&self.ciphertext, state))
    }
}

//! The autoperm cipher.
//!
//! Two keys σ and τ encipher the text a digraph at a time: the first letter of
//! each pair goes through σ, the second through τ. After each full pair both
//! keys are composed on the right with the transposition of the two plaintext
//! letters, so the keystream depends on everything already enciphered. A
//! dangling last letter is enciphered with σ and ends the stream.
//!
//! Decryption keeps σ⁻¹ and τ⁻¹ directly and updates them by composing the
//! same transposition on the left, since `(σ∘t)⁻¹ = t∘σ⁻¹`.

use crate::alphabet::{to_indices, to_symbols};
use crate::error::ApResult;
use crate::permutation::Permutation;
use serde::{Deserialize, Serialize};

/// The (σ, τ) key pair. Also the search state of the two-key climber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutopermKeys {
    pub sigma: Permutation,
    pub tau: Permutation,
}

impl AutopermKeys {
    pub fn new(sigma: Permutation, tau: Permutation) -> Self {
        Self { sigma, tau }
    }

    pub fn from_keywords(sigma: &str, tau: &str) -> Self {
        Self::new(
            Permutation::from_keyword(sigma),
            Permutation::from_keyword(tau),
        )
    }

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let sigma = Permutation::random(rng);
        let tau = Permutation::random(rng);
        Self::new(sigma, tau)
    }
}

pub fn encrypt(plaintext: &[u8], keys: &AutopermKeys) -> ApResult<Vec<u8>> {
    let indices = to_indices(plaintext)?;
    Ok(to_symbols(&encrypt_indices(&indices, keys)))
}

pub fn decrypt(ciphertext: &[u8], keys: &AutopermKeys) -> ApResult<Vec<u8>> {
    let indices = to_indices(ciphertext)?;
    Ok(to_symbols(&decrypt_indices(&indices, keys)))
}

pub fn encrypt_indices(plain: &[u8], keys: &AutopermKeys) -> Vec<u8> {
    let mut sigma = keys.sigma;
    let mut tau = keys.tau;
    let mut out = Vec::with_capacity(plain.len());

    for pair in plain.chunks(2) {
        match *pair {
            [a, b] => {
                out.push(sigma.apply_index(a));
                out.push(tau.apply_index(b));
                let swap = Permutation::transposition(a, b);
                sigma = sigma.compose(&swap);
                tau = tau.compose(&swap);
            }
            [a] => out.push(sigma.apply_index(a)),
            _ => {}
        }
    }
    out
}

pub fn decrypt_indices(cipher: &[u8], keys: &AutopermKeys) -> Vec<u8> {
    let mut sigma_inv = keys.sigma.inverse();
    let mut tau_inv = keys.tau.inverse();
    let mut out = Vec::with_capacity(cipher.len());

    for pair in cipher.chunks(2) {
        match *pair {
            [a, b] => {
                let a_plain = sigma_inv.apply_index(a);
                let b_plain = tau_inv.apply_index(b);
                out.push(a_plain);
                out.push(b_plain);
                let swap = Permutation::transposition(a_plain, b_plain);
                sigma_inv = swap.compose(&sigma_inv);
                tau_inv = swap.compose(&tau_inv);
            }
            [a] => out.push(sigma_inv.apply_index(a)),
            _ => {}
        }
    }
    out
}

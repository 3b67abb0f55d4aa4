use crate::alphabet::{to_indices, to_symbols};
use crate::error::ApResult;
use crate::permutation::Permutation;

pub fn encrypt(plaintext: &[u8], key: &Permutation) -> ApResult<Vec<u8>> {
    let indices = to_indices(plaintext)?;
    Ok(to_symbols(&apply_indices(&indices, key)))
}

pub fn decrypt(ciphertext: &[u8], key: &Permutation) -> ApResult<Vec<u8>> {
    encrypt(ciphertext, &key.inverse())
}

/// Applies `key` to every index. Used directly by the searches, which keep
/// the decryption key as their state.
#[inline]
pub fn apply_indices(indices: &[u8], key: &Permutation) -> Vec<u8> {
    indices.iter().map(|&i| key.apply_index(i)).collect()
}

use crate::alphabet;
use crate::consts::{ALPHABET_SIZE, ENGLISH_FREQUENCY_ORDER, TRANSPOSITION_COUNT};
use crate::permutation::Permutation;
use fastrand::Rng;

pub fn seeded_rng(seed: Option<u64>) -> Rng {
    if let Some(s) = seed {
        Rng::with_seed(s)
    } else {
        Rng::new()
    }
}

/// Every swap of two distinct letters, in lexicographic pair order.
pub fn transpositions() -> Vec<Permutation> {
    let mut moves = Vec::with_capacity(TRANSPOSITION_COUNT);
    for a in 0..ALPHABET_SIZE as u8 {
        for b in (a + 1)..ALPHABET_SIZE as u8 {
            moves.push(Permutation::transposition(a, b));
        }
    }
    moves
}

pub fn shuffled(rng: &mut Rng, moves: &[Permutation]) -> Vec<Permutation> {
    let mut order = moves.to_vec();
    rng.shuffle(&mut order);
    order
}

/// `key ∘ t` for each move `t`, in the given order.
pub fn right_neighbors(
    key: Permutation,
    moves: Vec<Permutation>,
) -> impl Iterator<Item = Permutation> {
    moves.into_iter().map(move |t| key.compose(&t))
}

/// Decryption key that maps the ciphertext letters, most frequent first, onto
/// English letters in frequency order. Ties go to the earlier letter.
pub fn frequency_seed(cipher: &[u8]) -> Permutation {
    let counts = alphabet::counts(cipher);
    let mut ranked: Vec<u8> = (0..ALPHABET_SIZE as u8).collect();
    ranked.sort_by(|&a, &b| counts[b as usize].cmp(&counts[a as usize]).then(a.cmp(&b)));

    let mut images = [0u8; ALPHABET_SIZE];
    for (&cipher_letter, &plain_symbol) in ranked.iter().zip(ENGLISH_FREQUENCY_ORDER.iter()) {
        images[cipher_letter as usize] = plain_symbol - b'A';
    }
    // `ranked` and the frequency order are both arrangements of the alphabet
    let seed = Permutation::from_mapping(images);
    debug_assert!(seed.is_ok());
    seed.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transposition_count() {
        let moves = transpositions();
        assert_eq!(moves.len(), TRANSPOSITION_COUNT);
        assert!(moves.iter().all(|t| !t.is_identity() && t.compose(t).is_identity()));
    }

    #[test]
    fn test_frequency_seed_ranks_letters() {
        // X most common, then Q; everything else ties
        let cipher = [23, 23, 23, 16, 16, 0];
        let seed = frequency_seed(&cipher);
        assert_eq!(seed.apply_index(23), b'E' - b'A');
        assert_eq!(seed.apply_index(16), b'T' - b'A');
        assert_eq!(seed.apply_index(0), b'A' - b'A');
        // first of the zero-count letters is B
        assert_eq!(seed.apply_index(1), b'O' - b'A');
    }

    #[test]
    fn test_frequency_seed_is_always_a_permutation() {
        let pangram: Vec<u8> = (0..ALPHABET_SIZE as u8).rev().collect();
        for cipher in [&[][..], &[4; 9][..], &pangram[..]] {
            let seed = frequency_seed(cipher);
            assert!(seed.is_valid_permutation());
        }
        assert!(!frequency_seed(&[]).is_identity());
    }
}

use crate::consts::ALPHABET_SIZE;
use crate::error::{ApResult, AutopermError};

/// Maps `A..=Z` to `0..26`.
#[inline(always)]
pub fn to_index(symbol: u8) -> ApResult<u8> {
    if symbol.is_ascii_uppercase() {
        Ok(symbol - b'A')
    } else {
        Err(AutopermError::Domain {
            symbol: symbol as char,
        })
    }
}

#[inline(always)]
pub fn to_symbol(index: u8) -> u8 {
    debug_assert!((index as usize) < ALPHABET_SIZE);
    b'A' + index
}

/// Converts a whole symbol sequence, failing on the first symbol outside the alphabet.
pub fn to_indices(symbols: &[u8]) -> ApResult<Vec<u8>> {
    symbols.iter().map(|&s| to_index(s)).collect()
}

pub fn to_symbols(indices: &[u8]) -> Vec<u8> {
    indices.iter().map(|&i| to_symbol(i)).collect()
}

/// Letter counts of an index sequence.
pub fn counts(indices: &[u8]) -> [usize; ALPHABET_SIZE] {
    let mut counts = [0usize; ALPHABET_SIZE];
    for &i in indices {
        counts[i as usize] += 1;
    }
    counts
}

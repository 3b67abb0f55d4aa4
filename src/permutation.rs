//! Bijections of the 26-letter alphabet.
//!
//! A [`Permutation`] is a plain value (`Copy`): composing, inverting or raising
//! to a power always produces a new permutation. Code that "multiplies a key in
//! place" rebinds a local instead, so snapshots held by a search are never
//! altered behind its back.
//!
//! Composition convention: `p.compose(&q)` (and `p * q`) applies `q` first,
//! then `p`.

use crate::alphabet::{to_index, to_symbol};
use crate::consts::ALPHABET_SIZE;
use crate::error::{ApResult, AutopermError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permutation {
    // images[i] is the index that index i maps to
    images: [u8; ALPHABET_SIZE],
}

impl Permutation {
    pub fn identity() -> Self {
        let mut images = [0u8; ALPHABET_SIZE];
        for (i, slot) in images.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { images }
    }

    /// Builds a permutation from the images of `A..Z` given as indices.
    pub fn from_mapping(images: [u8; ALPHABET_SIZE]) -> ApResult<Self> {
        let perm = Self { images };
        if perm.is_valid_permutation() {
            Ok(perm)
        } else {
            Err(AutopermError::InvalidInput(format!(
                "mapping {:?} is not a bijection of the alphabet",
                images
            )))
        }
    }

    /// Rotates the given symbols (`a -> b -> c -> ... -> a`) and fixes the rest.
    pub fn from_cycle(sequence: &[u8]) -> ApResult<Self> {
        let mut seen = [false; ALPHABET_SIZE];
        let mut indices = Vec::with_capacity(sequence.len());
        for &symbol in sequence {
            let idx = to_index(symbol)?;
            if seen[idx as usize] {
                return Err(AutopermError::InvalidInput(format!(
                    "cycle {:?} repeats symbol '{}'",
                    String::from_utf8_lossy(sequence),
                    symbol as char
                )));
            }
            seen[idx as usize] = true;
            indices.push(idx);
        }

        let mut perm = Self::identity();
        for (pos, &from) in indices.iter().enumerate() {
            let to = indices[(pos + 1) % indices.len()];
            perm.images[from as usize] = to;
        }
        Ok(perm)
    }

    /// The 2-cycle exchanging two symbol indices.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is 26 or more.
    pub fn transposition(a: u8, b: u8) -> Self {
        let mut perm = Self::identity();
        perm.images.swap(a as usize, b as usize);
        perm
    }

    /// Derives a key from a memorable phrase.
    ///
    /// Letters are upper-cased and de-duplicated, everything else is dropped. The
    /// first positions of the alphabet map to the keyword letters in order; the
    /// remaining positions take the unused letters in circular alphabetical order,
    /// starting after the last keyword letter. Starting there (rather than at `A`)
    /// keeps the tail of the alphabet from mapping to itself.
    ///
    /// `"linustorvalds"` gives `LINUSTORVADEFGHJKMPQWXYZBC`.
    pub fn from_keyword(keyword: &str) -> Self {
        let mut used = [false; ALPHABET_SIZE];
        let mut images = [0u8; ALPHABET_SIZE];
        let mut filled = 0;
        let mut last = 0u8;

        let letters = keyword
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| b.to_ascii_uppercase() - b'A');

        for letter in letters {
            if !used[letter as usize] {
                used[letter as usize] = true;
                images[filled] = letter;
                filled += 1;
                last = letter;
            }
        }

        let remaining: Vec<u8> = (0..ALPHABET_SIZE as u8)
            .filter(|&i| !used[i as usize])
            .collect();
        let start = remaining.iter().take_while(|&&r| r < last).count();

        for (offset, slot) in images[filled..].iter_mut().enumerate() {
            *slot = remaining[(start + offset) % remaining.len()];
        }

        Self { images }
    }

    /// Uniformly random permutation (Fisher-Yates).
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut perm = Self::identity();
        rng.shuffle(&mut perm.images);
        perm
    }

    /// Image of an alphabet symbol.
    pub fn apply(&self, symbol: u8) -> ApResult<u8> {
        let idx = to_index(symbol)?;
        Ok(to_symbol(self.images[idx as usize]))
    }

    /// Image of an alphabet index. Hot path, so unchecked.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 26 or more.
    #[inline(always)]
    pub fn apply_index(&self, index: u8) -> u8 {
        self.images[index as usize]
    }

    /// `self ∘ other`: applies `other`, then `self`.
    #[inline]
    pub fn compose(&self, other: &Permutation) -> Permutation {
        let mut images = [0u8; ALPHABET_SIZE];
        for (slot, &mid) in images.iter_mut().zip(other.images.iter()) {
            *slot = self.images[mid as usize];
        }
        Permutation { images }
    }

    pub fn inverse(&self) -> Permutation {
        let mut images = [0u8; ALPHABET_SIZE];
        for (i, &img) in self.images.iter().enumerate() {
            images[img as usize] = i as u8;
        }
        Permutation { images }
    }

    /// Repeated composition; negative exponents invert first.
    pub fn power(&self, n: i64) -> Permutation {
        let mut base = if n < 0 { self.inverse() } else { *self };
        let mut exp = n.unsigned_abs();
        let mut acc = Permutation::identity();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.compose(&base);
            }
            base = base.compose(&base);
            exp >>= 1;
        }
        acc
    }

    pub fn is_valid_permutation(&self) -> bool {
        let mut seen = [false; ALPHABET_SIZE];
        for &img in &self.images {
            let img = img as usize;
            if img >= ALPHABET_SIZE || seen[img] {
                return false;
            }
            seen[img] = true;
        }
        true
    }

    pub fn is_identity(&self) -> bool {
        self.images
            .iter()
            .enumerate()
            .all(|(i, &img)| i == img as usize)
    }

    /// Non-trivial cycles as symbol strings, each starting at its smallest letter.
    pub fn cycles(&self) -> Vec<Vec<u8>> {
        let mut visited = [false; ALPHABET_SIZE];
        let mut cycles = Vec::new();
        for start in 0..ALPHABET_SIZE {
            if visited[start] || self.images[start] as usize == start {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = start;
            while !visited[current] {
                visited[current] = true;
                cycle.push(to_symbol(current as u8));
                current = self.images[current] as usize;
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// The images as indices, `A..Z` order.
    pub fn images(&self) -> &[u8; ALPHABET_SIZE] {
        &self.images
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Permutation {
    type Output = Permutation;

    fn mul(self, rhs: Permutation) -> Permutation {
        self.compose(&rhs)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &img in &self.images {
            write!(f, "{}", to_symbol(img) as char)?;
        }
        Ok(())
    }
}

/// Parses the 26 images of `A..Z`, e.g. `"LINUSTORVADEFGHJKMPQWXYZBC"`.
impl FromStr for Permutation {
    type Err = AutopermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != ALPHABET_SIZE {
            return Err(AutopermError::InvalidInput(format!(
                "permutation '{}' must list exactly {} images",
                s, ALPHABET_SIZE
            )));
        }
        let mut images = [0u8; ALPHABET_SIZE];
        for (slot, &b) in images.iter_mut().zip(bytes) {
            *slot = to_index(b.to_ascii_uppercase())?;
        }
        Self::from_mapping(images)
    }
}

impl TryFrom<String> for Permutation {
    type Error = AutopermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permutation> for String {
    fn from(perm: Permutation) -> Self {
        perm.to_string()
    }
}

#![allow(dead_code)]

use autoperm::alphabet;
use autoperm::Permutation;
use autoperm::consts::QUADGRAM_TABLE_LEN;
use autoperm::scorer::{Metric, QuadgramScorer};
use std::io::Write;
use tempfile::NamedTempFile;

pub const TRAINING_TEXT: &str = "\
It was the best of times, it was the worst of times, it was the age of wisdom, \
it was the age of foolishness, it was the epoch of belief, it was the epoch of \
incredulity, it was the season of light, it was the season of darkness, it was \
the spring of hope, it was the winter of despair. There were a king with a large \
jaw and a queen with a plain face on the throne of England; there were a king \
with a large jaw and a queen with a fair face on the throne of France. In both \
countries it was clearer than crystal to the lords of the state preserves of \
loaves and fishes that things in general were settled for ever. The time of the \
test came at the tower, and the traveller said that the tale they told was true. \
Then the thinking man went through the gate and over the hill to the harbour, \
where the ships that brought the mail were waiting for the turn of the tide.";

pub const PLAINTEXT: &str = "\
THEQUICKBROWNFOXJUMPSOVERTHELAZYDOGANDTHENRUNSAWAYFROMTHEFARMERWHOWANTSHIMBACK";

/// Quadgram scorer trained on [`TRAINING_TEXT`].
pub fn english_scorer() -> QuadgramScorer {
    QuadgramScorer::from_training_text(TRAINING_TEXT)
}

/// Writes a quadgram file with `entries` lines of `value`.
pub fn quadgram_file(entries: usize, value: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for _ in 0..entries {
        writeln!(file, "{}", value).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn full_quadgram_file(value: &str) -> NamedTempFile {
    quadgram_file(QUADGRAM_TABLE_LEN, value)
}

/// Exchanges exactly two letters.
pub fn is_swap(perm: &Permutation) -> bool {
    let cycles = perm.cycles();
    cycles.len() == 1 && cycles[0].len() == 2
}

/// Counts the positions where a candidate decryption differs from a known
/// plaintext. Every key that is wrong on a used letter has a strictly better
/// neighbor one swap away, so hill climbing always reaches zero.
pub struct TargetMismatch {
    target: Vec<u8>,
}

impl TargetMismatch {
    pub fn new(plaintext: &str) -> Self {
        Self {
            target: alphabet::to_indices(plaintext.as_bytes()).unwrap(),
        }
    }
}

impl Metric for TargetMismatch {
    fn score_indices(&self, text: &[u8]) -> f64 {
        let differing = text
            .iter()
            .zip(self.target.iter())
            .filter(|(a, b)| a != b)
            .count();
        (differing + text.len().abs_diff(self.target.len())) as f64
    }
}

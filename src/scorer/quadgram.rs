use super::loader;
use super::Metric;
use crate::consts::{ALPHABET_SIZE, QUADGRAM_TABLE_LEN};
use crate::error::{ApResult, AutopermError};
use crate::text;
use std::io::Read;
use std::path::Path;

const WINDOW_MODULUS: usize = QUADGRAM_TABLE_LEN / ALPHABET_SIZE;

/// Language fit by quadgram frequency. Lower scores look more like the
/// language the table was built from.
///
/// Scores are sums over windows, so they only compare between texts of equal
/// length.
#[derive(Debug, Clone)]
pub struct QuadgramScorer {
    table: Vec<f64>,
}

impl QuadgramScorer {
    pub fn from_table(table: Vec<f64>) -> ApResult<Self> {
        if table.len() != QUADGRAM_TABLE_LEN {
            return Err(AutopermError::Config(format!(
                "quadgram table has {} entries, expected {}",
                table.len(),
                QUADGRAM_TABLE_LEN
            )));
        }
        Ok(Self { table })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ApResult<Self> {
        Self::from_table(loader::load_quadgrams(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> ApResult<Self> {
        Self::from_table(loader::load_quadgrams_from_reader(reader)?)
    }

    /// Builds a table from a training corpus: each entry is the negative
    /// log10 probability of the quadgram, with unseen quadgrams priced as if
    /// they had been seen a hundredth of a time.
    pub fn from_training_text(corpus: &str) -> Self {
        let indices: Vec<u8> = text::strip(corpus).iter().map(|&b| b - b'A').collect();

        let mut counts = vec![0u32; QUADGRAM_TABLE_LEN];
        let mut total = 0u64;
        for window in indices.windows(4) {
            counts[window_index(window)] += 1;
            total += 1;
        }

        if total == 0 {
            return Self {
                table: vec![0.0; QUADGRAM_TABLE_LEN],
            };
        }

        let total = total as f64;
        let floor = -(0.01 / total).log10();
        let table = counts
            .into_iter()
            .map(|c| {
                if c == 0 {
                    floor
                } else {
                    -(c as f64 / total).log10()
                }
            })
            .collect();

        Self { table }
    }

    /// Table entry for one window of four indices.
    #[inline(always)]
    pub fn lookup(&self, window: &[u8]) -> f64 {
        self.table[window_index(window)]
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }
}

impl Metric for QuadgramScorer {
    fn score_indices(&self, text: &[u8]) -> f64 {
        if text.len() < 4 {
            return 0.0;
        }
        // rolling base-26 value of the current window
        let mut idx = window_index(&text[..3]);
        let mut total = 0.0;
        for &next in &text[3..] {
            idx = (idx % WINDOW_MODULUS) * ALPHABET_SIZE + next as usize;
            total += self.table[idx];
        }
        total
    }
}

/// Big-endian base-26 value of a window (`A` = 0, most significant first).
#[inline(always)]
pub fn window_index(window: &[u8]) -> usize {
    window
        .iter()
        .fold(0usize, |acc, &i| acc * ALPHABET_SIZE + i as usize)
}

use super::Metric;
use crate::alphabet;
use crate::consts::{ALPHABET_SIZE, ENGLISH_FREQUENCIES};

/// "Blind" monogram fit: compares the sorted letter frequencies of a text with
/// the sorted English frequencies, ignoring which letter is which. A text
/// that is a simple substitution of English scores close to zero.
#[derive(Debug, Clone)]
pub struct FrequencyFit {
    expected: [f64; ALPHABET_SIZE],
}

impl FrequencyFit {
    pub fn english() -> Self {
        Self::new(ENGLISH_FREQUENCIES)
    }

    /// `frequencies` are relative letter frequencies, in any letter order.
    pub fn new(frequencies: [f64; ALPHABET_SIZE]) -> Self {
        let mut expected = frequencies;
        expected.sort_by(|a, b| b.total_cmp(a));
        Self { expected }
    }
}

impl Default for FrequencyFit {
    fn default() -> Self {
        Self::english()
    }
}

impl Metric for FrequencyFit {
    fn score_indices(&self, text: &[u8]) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let total = text.len() as f64;
        let mut observed = alphabet::counts(text).map(|c| c as f64 / total);
        observed.sort_by(|a, b| b.total_cmp(a));

        observed
            .iter()
            .zip(self.expected.iter())
            .map(|(o, e)| (o - e) * (o - e))
            .sum()
    }
}

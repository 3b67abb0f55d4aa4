pub mod frequency;
pub mod loader;
pub mod quadgram;

pub use self::frequency::FrequencyFit;
pub use self::quadgram::QuadgramScorer;

use crate::alphabet::to_indices;
use crate::error::ApResult;

/// A language-fit metric over alphabet indices. Lower is better.
///
/// The search strategies are generic over this trait, so any scoring function
/// can stand in for the quadgram table.
pub trait Metric: Send + Sync {
    fn score_indices(&self, text: &[u8]) -> f64;

    /// Scores a symbol sequence, rejecting anything outside `A..Z`.
    fn score(&self, text: &[u8]) -> ApResult<f64> {
        Ok(self.score_indices(&to_indices(text)?))
    }
}

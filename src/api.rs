use crate::cipher::AutopermKeys;
use crate::error::ApResult;
use crate::optimizer::{
    AutopermClimber, NestedConversionClimber, OptimizationOptions, OptimizationResult, Optimizer,
    ProgressCallback, StopReason, SubstitutionClimber,
};
use crate::permutation::Permutation;
use crate::scorer::Metric;
use crate::text;
use serde::Serialize;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{info, warn};

/// Which search recovers the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single-key substitution search.
    Substitution,
    /// Direct search over the autoperm key pair.
    Autoperm,
    /// Conversion key search with nested substitution searches.
    Conversion,
}

/// Outcome of a crack, shaped for display or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct CrackReport {
    pub strategy: Strategy,
    /// Substitution encryption key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Permutation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<AutopermKeys>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_key: Option<Permutation>,
    /// Approximate key pair derived from the conversion search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_keys: Option<AutopermKeys>,
    pub plaintext: String,
    pub score: f64,
    pub evaluated: u64,
    pub iterations: usize,
    pub elapsed_secs: f64,
    pub evaluations_per_second: f64,
    pub stop_reason: StopReason,
}

impl CrackReport {
    fn from_result<S>(strategy: Strategy, result: &OptimizationResult<S>, plaintext: Vec<u8>) -> Self {
        Self {
            strategy,
            key: None,
            keys: None,
            conversion_key: None,
            implied_keys: None,
            plaintext: String::from_utf8_lossy(&plaintext).into_owned(),
            score: result.score,
            evaluated: result.evaluated,
            iterations: result.iterations,
            elapsed_secs: result.elapsed.as_secs_f64(),
            evaluations_per_second: result.evaluations_per_second(),
            stop_reason: result.stop_reason,
        }
    }
}

/// Service: recover the key of a ciphertext.
///
/// Letters are taken from `ciphertext` and everything else is ignored.
pub fn crack<CB: ProgressCallback>(
    ciphertext: &str,
    strategy: Strategy,
    metric: Arc<dyn Metric>,
    options: OptimizationOptions,
    seed: Option<u64>,
    callback: &CB,
) -> ApResult<CrackReport> {
    let symbols = text::strip(ciphertext);
    info!(
        "Cracking {} letters with the {} strategy",
        symbols.len(),
        strategy
    );
    if symbols.len() < 4 {
        warn!("Ciphertext has fewer than 4 letters; every key scores the same");
    }

    let report = match strategy {
        Strategy::Substitution => {
            let climber = SubstitutionClimber::new(&symbols, metric, seed)?;
            let mut optimizer = Optimizer::new(climber, options);
            let result = optimizer.run(callback);
            let climber = optimizer.climber();
            CrackReport {
                key: Some(climber.encryption_key()),
                ..CrackReport::from_result(strategy, &result, climber.plaintext())
            }
        }
        Strategy::Autoperm => {
            let climber = AutopermClimber::new(&symbols, metric, seed)?;
            let mut optimizer = Optimizer::new(climber, options);
            let result = optimizer.run(callback);
            CrackReport {
                keys: Some(result.state),
                ..CrackReport::from_result(strategy, &result, optimizer.climber().plaintext())
            }
        }
        Strategy::Conversion => {
            let climber = NestedConversionClimber::new(&symbols, metric, seed)?;
            let mut optimizer = Optimizer::new(climber, options);
            let result = optimizer.run(callback);
            let outcome = optimizer.climber_mut().outcome();
            CrackReport {
                conversion_key: Some(outcome.conversion_key),
                key: Some(outcome.substitution_key),
                implied_keys: Some(outcome.implied_keys),
                score: outcome.score,
                ..CrackReport::from_result(strategy, &result, outcome.plaintext.into_bytes())
            }
        }
    };

    info!(
        "Search finished ({}): score {:.4} after {} evaluations",
        report.stop_reason, report.score, report.evaluated
    );
    Ok(report)
}

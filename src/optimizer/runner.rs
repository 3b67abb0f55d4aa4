use crate::config::SearchParams;
use crate::consts::DEFAULT_UPDATE_INTERVAL;
use crate::optimizer::HillClimber;
use serde::Serialize;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    /// Evaluations between `on_progress` calls.
    pub update_interval: u64,
    pub max_evaluations: Option<u64>,
    pub max_time: Option<Duration>,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            max_evaluations: None,
            max_time: None,
        }
    }
}

impl From<&SearchParams> for OptimizationOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            update_interval: params.update_interval,
            max_evaluations: params.max_evaluations,
            max_time: params.max_time.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No neighbor of the final state scores strictly better.
    Converged,
    BudgetExhausted,
    TimedOut,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult<S> {
    pub state: S,
    pub score: f64,
    /// Candidates scored, not counting the starting state.
    pub evaluated: u64,
    /// Accepted improvements.
    pub iterations: usize,
    /// Best score after each accepted improvement, starting state first.
    pub history: Vec<f64>,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

impl<S> OptimizationResult<S> {
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }

    pub fn evaluations_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.evaluated as f64 / secs
        } else {
            0.0
        }
    }
}

/// A trait for receiving updates during optimization.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    /// `rate` is evaluations per second since the previous report.
    fn on_progress(&self, evaluated: u64, best_score: f64, rate: f64) -> bool;

    fn on_improvement(&self, _iteration: usize, _score: f64) {}
}

/// Silent callback for searches nobody watches.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _evaluated: u64, _best_score: f64, _rate: f64) -> bool {
        true
    }
}

/// First-improvement hill climbing over any [`HillClimber`].
pub struct Optimizer<C: HillClimber> {
    climber: C,
    options: OptimizationOptions,
}

impl<C: HillClimber> Optimizer<C> {
    pub fn new(climber: C, options: OptimizationOptions) -> Self {
        Self { climber, options }
    }

    pub fn climber(&self) -> &C {
        &self.climber
    }

    pub fn climber_mut(&mut self) -> &mut C {
        &mut self.climber
    }

    pub fn into_climber(self) -> C {
        self.climber
    }

    /// Initializes the climber's state, then climbs.
    pub fn run<CB: ProgressCallback>(&mut self, callback: &CB) -> OptimizationResult<C::State> {
        self.climber.initialize_state();
        self.resume(callback)
    }

    /// Climbs from whatever state the climber currently holds.
    ///
    /// Each round walks the neighbors of the current state and accepts the
    /// first one scoring strictly lower. The search ends when a whole round
    /// brings no improvement, or when a budget, the deadline or the callback
    /// stops it; the best state found so far is returned either way.
    pub fn resume<CB: ProgressCallback>(&mut self, callback: &CB) -> OptimizationResult<C::State> {
        let opts = &self.options;
        let climber = &mut self.climber;
        let interval = opts.update_interval.max(1);

        let start_time = Instant::now();
        let mut last_report = start_time;
        let mut since_last_report = 0u64;

        let current = climber.state().clone();
        let mut best_score = climber.score(&current);
        let mut history = vec![best_score];
        let mut evaluated = 0u64;
        let mut iterations = 0usize;

        let stop_reason = 'climb: loop {
            let mut improved = false;

            for candidate in climber.neighbors() {
                if let Some(budget) = opts.max_evaluations {
                    if evaluated >= budget {
                        break 'climb StopReason::BudgetExhausted;
                    }
                }
                if let Some(limit) = opts.max_time {
                    if start_time.elapsed() >= limit {
                        break 'climb StopReason::TimedOut;
                    }
                }

                evaluated += 1;
                since_last_report += 1;

                let score = climber.score(&candidate);
                let accepted = score < best_score;
                if accepted {
                    climber.set_state(candidate);
                    best_score = score;
                    iterations += 1;
                    history.push(score);
                    debug!(
                        "Improvement {} after {} evaluations: {:.4}",
                        iterations, evaluated, score
                    );
                    callback.on_improvement(iterations, score);
                }

                if evaluated % interval == 0 {
                    let now = Instant::now();
                    let duration = now.duration_since(last_report).as_secs_f64();
                    let rate = if duration > 0.0 {
                        since_last_report as f64 / duration
                    } else {
                        0.0
                    };
                    if !callback.on_progress(evaluated, best_score, rate) {
                        break 'climb StopReason::Cancelled;
                    }
                    last_report = now;
                    since_last_report = 0;
                }

                if accepted {
                    improved = true;
                    break;
                }
            }

            if !improved {
                break StopReason::Converged;
            }
        };

        debug!(
            "Search stopped ({}) after {} evaluations, {} improvements",
            stop_reason, evaluated, iterations
        );

        OptimizationResult {
            state: climber.state().clone(),
            score: best_score,
            evaluated,
            iterations,
            history,
            elapsed: start_time.elapsed(),
            stop_reason,
        }
    }
}

pub mod autoperm;
pub mod conversion;
pub mod mutation;
pub mod runner;
pub mod substitution;

pub use self::autoperm::AutopermClimber;
pub use self::conversion::{ConversionClimber, ConversionOutcome, NestedConversionClimber};
pub use self::runner::{
    NoProgress, OptimizationOptions, OptimizationResult, Optimizer, ProgressCallback, StopReason,
};
pub use self::substitution::SubstitutionClimber;

/// A finite, freshly generated sequence of candidate states.
pub type Neighbors<S> = Box<dyn Iterator<Item = S>>;

/// What a search strategy has to provide to be driven by the [`Optimizer`].
///
/// The strategy owns its current state (and its random source); the optimizer
/// only reads it, proposes replacements through `set_state`, and asks for
/// scores. Lower scores are better.
pub trait HillClimber {
    type State: Clone + 'static;

    /// Picks the starting state.
    fn initialize_state(&mut self);

    fn state(&self) -> &Self::State;

    fn set_state(&mut self, state: Self::State);

    /// Candidates around the current state, consumed lazily up to the first
    /// improvement.
    fn neighbors(&mut self) -> Neighbors<Self::State>;

    fn score(&mut self, state: &Self::State) -> f64;
}

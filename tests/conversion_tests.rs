mod common;

use autoperm::api::{self, Strategy};
use autoperm::cipher::autoperm::{self as autoperm_cipher, AutopermKeys};
use autoperm::optimizer::conversion::convert_indices;
use autoperm::optimizer::{
    ConversionClimber, HillClimber, NestedConversionClimber, NoProgress, OptimizationOptions,
    Optimizer, StopReason,
};
use autoperm::cipher::substitution;
use autoperm::scorer::{FrequencyFit, Metric};
use autoperm::{alphabet, Permutation};
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;

fn budget(max_evaluations: u64) -> OptimizationOptions {
    OptimizationOptions {
        max_evaluations: Some(max_evaluations),
        ..Default::default()
    }
}

#[test]
fn test_conversion_of_equal_keys_is_substitution() {
    // With σ = τ the first pair is a plain substitution under σ
    let sigma = Permutation::from_keyword("zebra");
    let keys = AutopermKeys::new(sigma, sigma);
    let cipher = autoperm_cipher::encrypt(b"HI", &keys).unwrap();
    let indices = alphabet::to_indices(&cipher).unwrap();

    let c = keys.sigma.compose(&keys.tau.inverse());
    assert!(c.is_identity());
    assert_eq!(convert_indices(&indices, &c), indices);
}

#[test]
fn test_conversion_key_links_the_pair() {
    // First pair only: converting with σ∘τ⁻¹ makes both letters σ-images
    let keys = AutopermKeys::from_keywords("linustorvalds", "zebra");
    let cipher = autoperm_cipher::encrypt(b"QQ", &keys).unwrap();
    let indices = alphabet::to_indices(&cipher).unwrap();

    let c = keys.sigma.compose(&keys.tau.inverse());
    let converted = convert_indices(&indices, &c);
    assert_eq!(converted[0], converted[1]);
}

#[test]
fn test_frequency_climber_improves_fit() {
    let keys = AutopermKeys::from_keywords("alpha", "omega");
    let cipher = autoperm_cipher::encrypt(common::PLAINTEXT.as_bytes(), &keys).unwrap();

    let climber = ConversionClimber::new(&cipher, Arc::new(FrequencyFit::english()), Some(9)).unwrap();
    let mut optimizer = Optimizer::new(climber, OptimizationOptions::default());
    let result = optimizer.run(&NoProgress);

    assert!(result.converged());
    assert!(result.score <= result.history[0]);
    assert!(result.state.is_valid_permutation());
}

#[test]
fn test_nested_search_respects_outer_budget() {
    let keys = AutopermKeys::from_keywords("alpha", "omega");
    let cipher = autoperm_cipher::encrypt(common::PLAINTEXT.as_bytes(), &keys).unwrap();

    let climber = NestedConversionClimber::new(&cipher, Arc::new(common::english_scorer()), Some(2))
        .unwrap()
        .with_inner_options(budget(200));
    let mut optimizer = Optimizer::new(climber, budget(3));
    let result = optimizer.run(&NoProgress);

    assert_eq!(result.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(result.evaluated, 3);

    let outcome = optimizer.climber_mut().outcome();
    assert_eq!(outcome.conversion_key, result.state);
    assert_eq!(outcome.plaintext.len(), common::PLAINTEXT.len());
    assert_eq!(outcome.implied_keys.sigma, outcome.substitution_key);
    assert_eq!(
        outcome.implied_keys.tau,
        outcome.conversion_key.inverse().compose(&outcome.substitution_key)
    );
}

#[rstest]
#[case(0, 0)]
#[case(1, 5)]
#[case(2, 5)]
#[case(3, 5)]
#[case(4, 12)]
fn test_nested_outcome_matches_search_result(#[case] seed: u64, #[case] outer: u64) {
    let keys = AutopermKeys::from_keywords("alpha", "omega");
    let cipher = autoperm_cipher::encrypt(common::PLAINTEXT.as_bytes(), &keys).unwrap();

    let climber = NestedConversionClimber::new(&cipher, Arc::new(common::english_scorer()), Some(seed))
        .unwrap()
        .with_inner_options(budget(300));
    let mut optimizer = Optimizer::new(climber, budget(outer));
    let result = optimizer.run(&NoProgress);

    let outcome = optimizer.climber_mut().outcome();
    assert_eq!(outcome.conversion_key, result.state);
    assert_eq!(outcome.score, result.score);

    // The plaintext is the converted text read with the reported key
    let indices = alphabet::to_indices(&cipher).unwrap();
    let converted = alphabet::to_symbols(&convert_indices(&indices, &outcome.conversion_key));
    let read = substitution::decrypt(&converted, &outcome.substitution_key).unwrap();
    assert_eq!(outcome.plaintext.as_bytes(), read.as_slice());

    // Asking again does not search again
    let again = optimizer.climber_mut().outcome();
    assert_eq!(again.score, outcome.score);
    assert_eq!(again.substitution_key, outcome.substitution_key);
}

#[test]
fn test_nested_outcome_for_unscored_key_searches_once() {
    let cipher = autoperm_cipher::encrypt(
        common::PLAINTEXT.as_bytes(),
        &AutopermKeys::from_keywords("alpha", "omega"),
    )
    .unwrap();
    let mut climber = NestedConversionClimber::new(&cipher, Arc::new(common::english_scorer()), Some(6))
        .unwrap()
        .with_inner_options(budget(100));
    climber.set_state(Permutation::from_keyword("zebra"));

    let first = climber.outcome();
    let second = climber.outcome();
    assert_eq!(first.conversion_key, Permutation::from_keyword("zebra"));
    assert_eq!(first.score, second.score);
    assert_eq!(first.plaintext, second.plaintext);
}

#[test]
fn test_conversion_neighbors_are_swaps_only() {
    let cipher = autoperm_cipher::encrypt(
        common::PLAINTEXT.as_bytes(),
        &AutopermKeys::from_keywords("alpha", "omega"),
    )
    .unwrap();
    let key = Permutation::from_keyword("linustorvalds");

    let mut frequency = ConversionClimber::new(&cipher, Arc::new(FrequencyFit::english()), Some(1)).unwrap();
    frequency.set_state(key);
    let mut nested = NestedConversionClimber::new(&cipher, Arc::new(common::english_scorer()), Some(1)).unwrap();
    nested.set_state(key);

    for candidates in [
        frequency.neighbors().collect::<Vec<_>>(),
        nested.neighbors().collect::<Vec<_>>(),
    ] {
        assert_eq!(candidates.len(), 325);
        assert!(candidates
            .iter()
            .all(|c| common::is_swap(&key.inverse().compose(c))));
        let distinct: HashSet<Permutation> = candidates.into_iter().collect();
        assert_eq!(distinct.len(), 325);
    }
}

#[test]
fn test_nested_initial_state_comes_from_frequency_fit() {
    let cipher = autoperm_cipher::encrypt(
        common::PLAINTEXT.as_bytes(),
        &AutopermKeys::from_keywords("alpha", "omega"),
    )
    .unwrap();
    let mut climber = NestedConversionClimber::new(&cipher, Arc::new(common::english_scorer()), Some(4)).unwrap();
    climber.initialize_state();
    assert!(climber.state().is_valid_permutation());
    assert!(!climber.state().is_identity());
}

#[test]
fn test_api_crack_conversion_reports_implied_keys() {
    let cipher = autoperm_cipher::encrypt(
        common::PLAINTEXT.as_bytes(),
        &AutopermKeys::from_keywords("alpha", "omega"),
    )
    .unwrap();

    let report = api::crack(
        &String::from_utf8_lossy(&cipher),
        Strategy::Conversion,
        Arc::new(common::english_scorer()),
        budget(2),
        Some(8),
        &NoProgress,
    )
    .unwrap();

    assert_eq!(report.strategy, Strategy::Conversion);
    assert_eq!(report.evaluated, 2);
    assert!(report.conversion_key.is_some());
    assert!(report.implied_keys.is_some());
    assert!(report.keys.is_none());

    // The score belongs to the reported plaintext
    let rescored = common::english_scorer()
        .score(report.plaintext.as_bytes())
        .unwrap();
    assert!((rescored - report.score).abs() < 1e-9);
}

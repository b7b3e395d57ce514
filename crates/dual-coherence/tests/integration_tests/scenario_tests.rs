//! End-to-end Optimization Scenarios

use dual_coherence::{
    optimize, AdaptiveState, CoherenceError, CoherenceOptimizer, OptimizerConfig, OptimizerState,
};
use ndarray::Array2;

use super::helpers::{
    basis_field, generate_adaptive, generate_field, init_tracing, max_distance, scenario_config,
    uniform_adaptive,
};

// =============================================================================
// CONVERGENCE
// =============================================================================

#[test]
fn test_basis_field_converges_within_budget() {
    init_tracing();
    let (field, adaptive, result) =
        optimize(&basis_field(3), &uniform_adaptive(3), &scenario_config(50, 0.9)).unwrap();

    assert!(result.converged, "history: {:?}", result.score_trace());
    assert!(result.cycles_run < 50);
    assert_eq!(result.status, OptimizerState::Converged);
    assert!(result.final_score >= 0.9);
    assert!(result.best_score >= result.final_score);
    assert!((field.norm() - 1.0).abs() < 1e-9);
    assert_eq!(adaptive.weights()[0][[0, 0]], 1.0);

    // The last three deltas satisfy the stability rule
    let tail = &result.history[result.history.len() - 3..];
    assert!(tail.iter().all(|r| r.delta.abs() < 0.01));
}

#[test]
fn test_fast_preset_converges_sooner() {
    init_tracing();
    let slow = scenario_config(100, 0.85);
    let fast = OptimizerConfig::fast_convergence_preset();

    let (_, _, slow_result) = optimize(&basis_field(3), &uniform_adaptive(3), &slow).unwrap();
    let (_, _, fast_result) = optimize(&basis_field(3), &uniform_adaptive(3), &fast).unwrap();

    assert!(slow_result.converged);
    assert!(fast_result.converged);
    assert!(fast_result.cycles_run <= slow_result.cycles_run);
}

// =============================================================================
// EXHAUSTION
// =============================================================================

#[test]
fn test_unreachable_threshold_exhausts() {
    init_tracing();
    let (field, _, result) =
        optimize(&basis_field(3), &uniform_adaptive(3), &scenario_config(5, 0.999999)).unwrap();

    assert!(!result.converged);
    assert!(!result.cancelled);
    assert_eq!(result.cycles_run, 5);
    assert_eq!(result.status, OptimizerState::Exhausted);
    assert!((0.0..=1.0).contains(&field.coherence()));
    assert!((0.0..=1.0).contains(&result.final_score));
}

#[test]
fn test_zero_cycles_is_idempotent() {
    let field = generate_field(4, 3);
    let adaptive = generate_adaptive(4, 3);
    let (out_field, out_adaptive, result) =
        optimize(&field, &adaptive, &scenario_config(0, 0.9)).unwrap();

    assert_eq!(result.cycles_run, 0);
    assert!(!result.converged);
    assert!(result.history.is_empty());
    assert!(max_distance(field.amplitude(), out_field.amplitude()) < 1e-9);
    assert_eq!(out_field.phase(), field.phase());
    assert_eq!(out_adaptive.weights(), adaptive.weights());
}

#[test]
fn test_zero_rate_is_noop_on_general_states() {
    let field = generate_field(5, 11);
    let adaptive = generate_adaptive(5, 11);
    let config = OptimizerConfig {
        learning_rate: 0.0,
        ..scenario_config(6, 0.99)
    };
    let (out_field, out_adaptive, result) = optimize(&field, &adaptive, &config).unwrap();

    assert!(max_distance(field.amplitude(), out_field.amplitude()) < 1e-9);
    assert_eq!(out_field.phase(), field.phase());
    assert_eq!(out_adaptive.weights(), adaptive.weights());
    assert_eq!(out_adaptive.adaptation_log().len(), result.cycles_run);
    for record in &result.history {
        assert!(record.delta.abs() < 1e-9);
    }
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_three_vs_four_dimension_mismatch() {
    init_tracing();
    let adaptive = AdaptiveState::new(Array2::from_elem((2, 4), 0.5), vec![]).unwrap();
    let mut optimizer = CoherenceOptimizer::new(scenario_config(10, 0.9)).unwrap();
    let err = optimizer.run(&basis_field(3), &adaptive).unwrap_err();

    match err {
        CoherenceError::DimensionMismatch { expected, actual } => {
            assert_eq!((expected, actual), (3, 4));
        }
        other => panic!("expected DimensionMismatch, got {}", other),
    }
    assert_eq!(optimizer.state(), OptimizerState::Failed);
    assert!(!CoherenceError::DimensionMismatch {
        expected: 3,
        actual: 4
    }
    .is_recoverable());
}

#[test]
fn test_invalid_configuration_before_loop() {
    let config = OptimizerConfig {
        convergence_threshold: 1.0,
        ..Default::default()
    };
    let err = optimize(&basis_field(3), &uniform_adaptive(3), &config).unwrap_err();
    assert!(matches!(err, CoherenceError::InvalidConfiguration(_)));
    assert!(err.is_optimizer_failure());
}

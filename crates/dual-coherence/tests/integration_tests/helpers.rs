//! Helper Functions: Deterministic State Generation (NO MOCKS)

use dual_coherence::{AdaptiveState, FieldState, OptimizerConfig};
use ndarray::Array2;
use num_complex::Complex64;

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Basis vector `e_0` of dimension `dim`.
pub fn basis_field(dim: usize) -> FieldState {
    let mut values = vec![0.0; dim];
    values[0] = 1.0;
    FieldState::from_real(&values).unwrap()
}

/// Single activation row of `1/√dim`, the mean of a normalized uniform vector.
pub fn uniform_adaptive(dim: usize) -> AdaptiveState {
    let value = 1.0 / (dim as f64).sqrt();
    AdaptiveState::new(Array2::from_elem((1, dim), value), vec![Array2::from_elem((1, 1), 1.0)])
        .unwrap()
}

/// Deterministic complex amplitude built from sin/cos, with a matching phase map.
pub fn generate_field(dim: usize, seed: u64) -> FieldState {
    let amplitude = Array2::from_shape_fn((dim, 1), |(i, _)| {
        let x = (i as f64 + seed as f64) * 0.7;
        Complex64::new(x.sin() + 1.1, 0.5 * x.cos())
    });
    let phase = Array2::from_shape_fn((dim, 1), |(i, _)| ((i as f64 + seed as f64) * 0.3).sin());
    FieldState::new(amplitude, phase).unwrap()
}

/// Deterministic non-negative activations, `samples × dim`.
pub fn generate_activations(samples: usize, dim: usize, seed: u64) -> Array2<f64> {
    Array2::from_shape_fn((samples, dim), |(r, c)| {
        let x = (r as f64 * 1.3 + c as f64 + seed as f64) * 0.1;
        (x.sin() + 1.0) / (2.0 * (dim as f64).sqrt())
    })
}

/// Deterministic weight tensors with spread.
pub fn generate_weights(count: usize, rows: usize, cols: usize, seed: u64) -> Vec<Array2<f64>> {
    (0..count)
        .map(|k| {
            Array2::from_shape_fn((rows, cols), |(r, c)| {
                ((r * cols + c + k) as f64 + seed as f64).cos() * 2.0
            })
        })
        .collect()
}

/// Deterministic adaptive state of dimension `dim`.
pub fn generate_adaptive(dim: usize, seed: u64) -> AdaptiveState {
    AdaptiveState::new(generate_activations(4, dim, seed), generate_weights(3, 2, 3, seed)).unwrap()
}

/// The reference scenario configuration: rate 0.01, window 3, seed 42.
pub fn scenario_config(max_cycles: usize, threshold: f64) -> OptimizerConfig {
    OptimizerConfig {
        max_cycles,
        learning_rate: 0.01,
        convergence_threshold: threshold,
        stability_window: 3,
        seed: 42,
        ..Default::default()
    }
}

/// Maximum entry-wise distance between two complex matrices.
pub fn max_distance(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

//! Persistence Encoding Tests

use std::io::Write;

use dual_coherence::{optimize, PersistedState};

use super::helpers::{
    basis_field, generate_adaptive, generate_field, max_distance, scenario_config,
    uniform_adaptive,
};

#[test]
fn test_optimized_pair_survives_json() {
    let (field, adaptive, _) = optimize(
        &generate_field(4, 8),
        &generate_adaptive(4, 8),
        &scenario_config(10, 0.999),
    )
    .unwrap();

    let json = PersistedState::capture(&field, &adaptive).to_json().unwrap();
    let (restored_field, restored_adaptive) =
        PersistedState::from_json(&json).unwrap().restore().unwrap();

    assert!(max_distance(field.amplitude(), restored_field.amplitude()) < 1e-9);
    for (a, b) in field.phase().iter().zip(restored_field.phase().iter()) {
        assert!((a - b).abs() < 1e-12);
    }
    assert_eq!(restored_adaptive.weights().len(), adaptive.weights().len());
    for (wa, wb) in adaptive.weights().iter().zip(restored_adaptive.weights()) {
        for (a, b) in wa.iter().zip(wb.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
    assert_eq!(
        restored_adaptive.coupling().strength,
        adaptive.coupling().strength
    );
}

#[test]
fn test_restored_pair_resumes_optimization() {
    let config = scenario_config(50, 0.9);
    let (field, adaptive, first) =
        optimize(&basis_field(3), &uniform_adaptive(3), &scenario_config(5, 0.9)).unwrap();
    assert!(!first.converged);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = PersistedState::capture(&field, &adaptive).to_json().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let (field, adaptive) = PersistedState::from_json(&content)
        .unwrap()
        .restore()
        .unwrap();
    let (_, _, resumed) = optimize(&field, &adaptive, &config).unwrap();

    assert!(resumed.converged);
    assert!(resumed.initial_score >= first.initial_score);
}

#[test]
fn test_capture_omits_nothing_required() {
    let (field, adaptive) = (basis_field(3), uniform_adaptive(3));
    let value: serde_json::Value =
        serde_json::from_str(&PersistedState::capture(&field, &adaptive).to_json().unwrap())
            .unwrap();
    for key in ["amplitude", "phase", "weights", "activations", "coupling_strength"] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
}

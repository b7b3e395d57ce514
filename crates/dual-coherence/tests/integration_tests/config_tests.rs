//! Configuration Loading Tests

use std::io::Write;

use dual_coherence::{optimize, CouplingTopology, OptimizerConfig};

use super::helpers::{basis_field, uniform_adaptive};

#[test]
fn test_toml_file_drives_a_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
max_cycles = 40
learning_rate = 0.01
convergence_threshold = 0.9
seed = 42

[weights]
field = 0.4
adaptive = 0.3
cross = 0.3

[coupling]
topology = "all_to_all"
jitter = 0.05
"#
    )
    .unwrap();

    let config = OptimizerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.coupling.topology, CouplingTopology::AllToAll);

    let (_, _, result) = optimize(&basis_field(3), &uniform_adaptive(3), &config).unwrap();
    assert!(result.converged);
}

#[test]
fn test_invalid_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "learning_rate = -0.5").unwrap();
    assert!(OptimizerConfig::from_file(file.path()).is_err());
}

#[test]
fn test_layered_load_reads_environment() {
    std::env::set_var("COHERENCE__MAX_CYCLES", "7");
    let config = OptimizerConfig::load();
    std::env::remove_var("COHERENCE__MAX_CYCLES");

    let config = config.unwrap();
    assert_eq!(config.max_cycles, 7);
    assert_eq!(config.stability_window, 3);
}

//! Integration tests for the dual-representation coherence optimizer
//!
//! These tests drive the public API end to end with deterministic states (NO MOCKS):
//! - Convergence and exhaustion scenarios
//! - Invariants on every produced state (normalization, bounds)
//! - Cancellation, persistence and configuration loading

mod helpers;
mod config_tests;
mod persistence_tests;
mod property_tests;
mod scenario_tests;

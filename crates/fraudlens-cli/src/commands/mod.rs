pub mod bench;
pub mod feed;
pub mod investigate;
pub mod scan;

use std::path::Path;

use fraudlens_core::ScoringEngine;

/// Open the scoring engine, surfacing degraded mode on stderr.
pub fn make_engine(data_dir: &str) -> ScoringEngine {
    let engine = ScoringEngine::open(Path::new(data_dir));
    if engine.is_degraded() {
        eprintln!(
            "Warning: artifacts not found under '{data_dir}'; running degraded on synthetic data"
        );
    }
    engine
}

/// Sample mean and standard deviation of a slice.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, var.sqrt())
}

//! Simulated two-qubit measurement distributions.
//!
//! Models the shot counts a measurement of the forecast circuit would
//! produce. A biased landscape collapses the system onto `|10>` (the cascade
//! state targeted by the ZI bias); an unbiased one stays in the `|00>` ground
//! state. Per-label shot noise jitters the fixed base tables, and the result
//! is renormalized so the output is always a valid 4-outcome PMF.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

/// Half-width of the uniform shot-noise jitter applied per label.
pub const JITTER_HALF_WIDTH: f64 = 0.005;

/// Display labels for the four basis states, in measurement order.
pub const BASIS_LABELS: [&str; 4] = [
    "00 (Normal)",
    "01 (Medium)",
    "10 (Critical)",
    "11 (High)",
];

/// Base distribution once the ZI bias has collapsed the system onto |10>.
const BIASED_BASE: [f64; 4] = [0.02, 0.03, 0.94, 0.01];
/// Base distribution for an unbiased landscape resting in |00>.
const UNBIASED_BASE: [f64; 4] = [0.95, 0.03, 0.01, 0.01];

/// A 4-outcome probability mass function over the basis labels.
///
/// Entries are non-negative and sum to 1 within rounding (4 decimals).
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MeasurementDistribution {
    probs: BTreeMap<&'static str, f64>,
}

impl MeasurementDistribution {
    /// Probability for a basis label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.probs.get(label).copied()
    }

    /// Number of outcomes (always 4).
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Sum over all outcomes. 1.0 within rounding.
    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Iterate label/probability pairs in basis order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.probs.iter().map(|(k, v)| (*k, *v))
    }
}

/// Simulate the measurement distribution for a landscape.
///
/// Applies independent uniform jitter in `[-JITTER_HALF_WIDTH,
/// JITTER_HALF_WIDTH]` per label, clamps at zero, renormalizes, and rounds to
/// 4 decimals.
pub fn sample_distribution(bias_applied: bool, rng: &mut impl Rng) -> MeasurementDistribution {
    let base = if bias_applied {
        BIASED_BASE
    } else {
        UNBIASED_BASE
    };

    let mut jittered = [0.0; 4];
    let mut total = 0.0;
    for (slot, p) in jittered.iter_mut().zip(base) {
        let noise = rng.random_range(-JITTER_HALF_WIDTH..=JITTER_HALF_WIDTH);
        *slot = (p + noise).max(0.0);
        total += *slot;
    }

    let probs = BASIS_LABELS
        .iter()
        .zip(jittered)
        .map(|(label, p)| (*label, round4(p / total)))
        .collect();
    MeasurementDistribution { probs }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

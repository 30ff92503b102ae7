//! Ground-state energy forecast simulator.
//!
//! Substitutes a closed-form simulated ground state for an iterative
//! optimizer: a biased landscape collapses into a deep well around
//! [`FRAUD_WELL_ENERGY`], an unbiased one stays convex around
//! [`BASELINE_ENERGY`]. The trade is fidelity for bounded latency: the feed
//! needs sub-millisecond scoring, not a solver loop.
//!
//! Only the bias flag is consulted; the projected coefficient magnitudes are
//! deliberately ignored. Two transactions with different coefficients but the
//! same flag draw from statistically identical energy distributions.

use rand::Rng;
use serde::Serialize;

use crate::noise::gaussian;

/// Center of the biased (fraud-regime) energy well.
pub const FRAUD_WELL_ENERGY: f64 = -2.5;
/// Noise width of the biased well.
pub const FRAUD_WELL_SIGMA: f64 = 0.2;
/// Center of the unbiased (normal-regime) landscape.
pub const BASELINE_ENERGY: f64 = 2.0;
/// Noise width of the unbiased landscape.
pub const BASELINE_SIGMA: f64 = 0.05;

/// Energies below this are classified CRITICAL.
pub const CRITICAL_THRESHOLD: f64 = -1.5;
/// Divisor mapping |energy| into the CRITICAL risk band.
pub const RISK_SCALE: f64 = 3.0;
/// Fixed risk score for the WARNING band.
pub const WARNING_RISK: f64 = 0.3;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Qualitative risk band for a forecast energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskStatus {
    #[serde(rename = "STABLE")]
    Stable,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stable => write!(f, "STABLE"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Map an energy onto its fixed band and risk score.
///
/// Bands are monotonic in energy: CRITICAL below [`CRITICAL_THRESHOLD`],
/// WARNING for the rest of the negative range, STABLE at zero and above.
/// The returned risk score is always in `[0, 1]`.
pub fn classify(energy: f64) -> (RiskStatus, f64) {
    if energy < CRITICAL_THRESHOLD {
        (RiskStatus::Critical, (energy.abs() / RISK_SCALE).min(1.0))
    } else if energy < 0.0 {
        (RiskStatus::Warning, WARNING_RISK)
    } else {
        (RiskStatus::Stable, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// Simulated ground-state forecast for one transaction.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnergyForecast {
    pub energy: f64,
    pub risk_score: f64,
    pub status: RiskStatus,
    pub bias_active: bool,
}

/// Simulate the converged ground-state energy for a landscape.
pub fn forecast_ground_state(bias_applied: bool, rng: &mut impl Rng) -> EnergyForecast {
    let energy = if bias_applied {
        gaussian(rng, FRAUD_WELL_ENERGY, FRAUD_WELL_SIGMA)
    } else {
        gaussian(rng, BASELINE_ENERGY, BASELINE_SIGMA)
    };
    let (status, risk_score) = classify(energy);
    EnergyForecast {
        energy,
        risk_score,
        status,
        bias_active: bias_applied,
    }
}

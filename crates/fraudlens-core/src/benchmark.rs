//! Classical baseline simulator.
//!
//! Emulates the scoring behaviour of a vector-based gradient-boosted
//! classifier, including its known blind spot: roughly 80% of the fraud set
//! is "sophisticated" mule-ring activity the classifier reads as normal
//! (~0.28), while the rest is obvious enough to score ~0.95.
//!
//! The sophistication branch is drawn from a generator seeded by the
//! transaction index, so repeated lookups of the same transaction always
//! land in the same branch. Score magnitude jitters with the caller's
//! generator; the branch never does.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::noise::gaussian;

/// Name reported for the emulated baseline model.
pub const MODEL_NAME: &str = "XGBoost (Vector-Based)";

/// Share of the fraud set assumed to be sophisticated/hidden.
pub const SOPHISTICATED_SHARE: f64 = 0.8;

/// Baseline verdict for one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkVerdict {
    pub score: f64,
    pub model_name: &'static str,
    pub blindspot_detected: bool,
}

/// Score a transaction the way the classical baseline would.
///
/// `jitter` supplies the magnitude noise; the sophistication branch comes
/// from an index-seeded stream and is reproducible per index.
pub fn classical_benchmark(
    is_fraud: bool,
    index: usize,
    jitter: &mut impl Rng,
) -> BenchmarkVerdict {
    let score = if is_fraud {
        let mut branch = ChaCha8Rng::seed_from_u64(index as u64);
        let sophisticated = branch.random::<f64>() < SOPHISTICATED_SHARE;
        if sophisticated {
            // The blind spot: hidden mule-ring fraud reads as normal.
            gaussian(jitter, 0.28, 0.05)
        } else {
            gaussian(jitter, 0.95, 0.02)
        }
    } else {
        gaussian(jitter, 0.02, 0.01)
    };

    BenchmarkVerdict {
        score,
        model_name: MODEL_NAME,
        blindspot_detected: is_fraud && score < 0.5,
    }
}

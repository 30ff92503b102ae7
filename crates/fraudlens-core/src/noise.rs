//! Scoped stochastic draw helpers.
//!
//! Every simulator takes an explicit `&mut impl Rng` instead of reaching for
//! ambient generator state. Callers decide the scope: the orchestrator hands
//! each request a thread-local generator for jitter, while the classical
//! benchmark seeds its own stream per transaction index.

use std::f64::consts::PI;

use rand::Rng;

/// One standard-normal draw via Box-Muller.
pub fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1 = rng.random::<f64>().clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Gaussian draw with the given mean and standard deviation.
pub fn gaussian(rng: &mut impl Rng, mean: f64, std: f64) -> f64 {
    mean + std * standard_normal(rng)
}

/// Gaussian draw clamped to `[lo, hi]`.
pub fn clipped_gaussian(rng: &mut impl Rng, mean: f64, std: f64, lo: f64, hi: f64) -> f64 {
    if std <= 1e-12 {
        return mean.clamp(lo, hi);
    }
    gaussian(rng, mean, std).clamp(lo, hi)
}

//! Unified per-transaction scoring pipeline.
//!
//! [`ScoringEngine`] is the single entry point for every caller: the
//! continuous feed and on-demand lookups run the exact same path through
//! screening, Hamiltonian projection, energy/measurement simulation,
//! topology classification, and the classical benchmark. There is no
//! feed-only or lookup-only variant of any step.
//!
//! The engine is an explicit context object built once at startup. Artifacts
//! are loaded (or the synthetic fallback engaged) at construction; scoring
//! itself is pure computation with request-local randomness and no blocking
//! I/O, which is what keeps the feed's latency bounded.

use std::path::Path;

use serde::Serialize;

use crate::benchmark::{BenchmarkVerdict, classical_benchmark};
use crate::dataset::{Dataset, DatasetAnalytics, synthetic_fallback};
use crate::error::ScoreError;
use crate::forecast::{RiskStatus, forecast_ground_state};
use crate::hamiltonian::{
    HamiltonianTerm, ProjectionMatrix, SCREENING_CUTOFF, build_coefficients, labeled_terms,
};
use crate::measurement::{MeasurementDistribution, sample_distribution};
use crate::noise::clipped_gaussian;
use crate::topology::{TopologyProfile, profile_topology};

/// Reported depth of the simulated forecast circuit.
pub const CIRCUIT_DEPTH: u32 = 15;

/// Transaction ids are `TX-{ID_OFFSET + index}`.
pub const ID_PREFIX: &str = "TX-";
pub const ID_OFFSET: u64 = 10_000;

// ---------------------------------------------------------------------------
// Forensic artifact
// ---------------------------------------------------------------------------

/// Transaction header of the artifact.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub id: String,
    /// Formatted for display, e.g. `"$9,839.64"`.
    pub amount: String,
    /// Masked account id, e.g. `"C123...6815"`.
    pub account: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub is_fraud: bool,
}

/// Classical pre-screening result.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningAssessment {
    pub probability: f64,
    pub vector_magnitude: f64,
    pub decision: &'static str,
}

/// The simulated quantum side of the artifact.
#[derive(Debug, Clone, Serialize)]
pub struct QuantumForecast {
    pub energy: f64,
    pub risk_score: f64,
    pub status: RiskStatus,
    pub probabilities: MeasurementDistribution,
    pub hamiltonian: [HamiltonianTerm; 3],
    pub circuit_depth: u32,
}

/// Complete forensic artifact for one transaction, the unit returned to
/// every caller.
#[derive(Debug, Clone, Serialize)]
pub struct ForensicArtifact {
    pub transaction: TransactionSummary,
    pub topology: TopologyProfile,
    pub screening: ScreeningAssessment,
    pub quantum_forecast: QuantumForecast,
    pub benchmark: BenchmarkVerdict,
}

/// One row of the transaction listing.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionListing {
    pub id: String,
    pub amount: f64,
    pub source: String,
    pub destination: String,
    pub is_fraud: bool,
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Load-once scoring context shared by all request handlers.
pub struct ScoringEngine {
    dataset: Dataset,
    projection: ProjectionMatrix,
    degraded: bool,
}

impl ScoringEngine {
    /// Build an engine over already-loaded artifacts.
    pub fn new(dataset: Dataset, projection: ProjectionMatrix) -> Self {
        Self {
            dataset,
            projection,
            degraded: false,
        }
    }

    /// Load artifacts from `dir`, falling back to the synthetic dataset on
    /// failure. The fallback is observable via [`ScoringEngine::is_degraded`].
    pub fn open(dir: &Path) -> Self {
        match crate::dataset::load_artifacts(dir) {
            Ok((dataset, projection)) => {
                log::info!(
                    "loaded {} transactions, projection {}x3",
                    dataset.len(),
                    projection.row_count()
                );
                Self::new(dataset, projection)
            }
            Err(err) => {
                log::warn!("could not load artifacts from {}: {err}; running degraded on synthetic data", dir.display());
                let (dataset, projection) = synthetic_fallback();
                Self {
                    dataset,
                    projection,
                    degraded: true,
                }
            }
        }
    }

    /// True when the engine is serving the synthetic fallback dataset.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Number of transactions in the dataset.
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Aggregate dataset statistics.
    pub fn analytics(&self) -> DatasetAnalytics {
        self.dataset.analytics()
    }

    /// Public id for a dataset index.
    pub fn transaction_id(&self, index: usize) -> String {
        format!("{ID_PREFIX}{}", ID_OFFSET + (index % self.dataset.len()) as u64)
    }

    /// First `limit` transactions as listing rows.
    pub fn list_transactions(&self, limit: usize) -> Vec<TransactionListing> {
        (0..self.dataset.len().min(limit))
            .map(|i| {
                let (record, _) = self.dataset.get(i);
                TransactionListing {
                    id: self.transaction_id(i),
                    amount: record.amount,
                    source: record.origin.clone(),
                    destination: record.destination.clone(),
                    is_fraud: record.is_fraud,
                    status: if record.is_fraud { "Flagged" } else { "Posted" },
                }
            })
            .collect()
    }

    /// Run the full pipeline for the transaction at `index` (mod N).
    pub fn score_index(&self, index: usize) -> Result<ForensicArtifact, ScoreError> {
        let idx = index % self.dataset.len();
        let (record, vector) = self.dataset.get(idx);
        let mut rng = rand::rng();

        // Stand-in for the upstream classifier's probability.
        let screening = screening_score(record.is_fraud, &mut rng);

        let coeffs = build_coefficients(vector, &self.projection, screening)?;
        let forecast = forecast_ground_state(coeffs.bias_applied, &mut rng);
        let probabilities = sample_distribution(coeffs.bias_applied, &mut rng);
        let topology = profile_topology(&record.origin, idx, record.out_degree, record.in_degree);
        let benchmark = classical_benchmark(record.is_fraud, idx, &mut rng);

        // Same pure function, same inputs: the display terms are guaranteed
        // to match the coefficients the forecast was derived from.
        let display = build_coefficients(vector, &self.projection, screening)?;

        Ok(ForensicArtifact {
            transaction: TransactionSummary {
                id: self.transaction_id(idx),
                amount: format_amount(record.amount),
                account: mask_account(&record.origin),
                kind: if record.is_fraud { "Transfer" } else { "Payment" },
                is_fraud: record.is_fraud,
            },
            topology,
            screening: ScreeningAssessment {
                probability: screening,
                vector_magnitude: vector.iter().map(|x| x * x).sum::<f64>().sqrt(),
                decision: if screening > SCREENING_CUTOFF {
                    "Suspicious"
                } else {
                    "Safe"
                },
            },
            quantum_forecast: QuantumForecast {
                energy: forecast.energy,
                risk_score: forecast.risk_score,
                status: forecast.status,
                probabilities,
                hamiltonian: labeled_terms(&display),
                circuit_depth: CIRCUIT_DEPTH,
            },
            benchmark: BenchmarkVerdict {
                score: round4(benchmark.score),
                ..benchmark
            },
        })
    }

    /// Look up by public id. Malformed or out-of-bounds ids are [`ScoreError::NotFound`];
    /// unlike the index path, ids never wrap.
    pub fn score_id(&self, id: &str) -> Result<ForensicArtifact, ScoreError> {
        let index = parse_transaction_id(id)
            .filter(|&idx| idx < self.dataset.len())
            .ok_or_else(|| ScoreError::NotFound(id.to_string()))?;
        self.score_index(index)
    }
}

/// Parse `TX-{10000+index}` back into an index. `None` when malformed or
/// below the id offset.
pub fn parse_transaction_id(id: &str) -> Option<usize> {
    let numeric: u64 = id.strip_prefix(ID_PREFIX)?.parse().ok()?;
    let index = numeric.checked_sub(ID_OFFSET)?;
    Some(index as usize)
}

// ---------------------------------------------------------------------------
// Screening heuristic
// ---------------------------------------------------------------------------

/// Simulated upstream pre-screen probability.
///
/// Fraud clusters high with variation (some sophisticated cases drift low);
/// legitimate traffic clusters low with rare higher false-positive tails.
fn screening_score(is_fraud: bool, rng: &mut impl rand::Rng) -> f64 {
    if is_fraud {
        clipped_gaussian(rng, 0.85, 0.05, 0.70, 0.98)
    } else {
        clipped_gaussian(rng, 0.15, 0.05, 0.02, 0.35)
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Format an amount with thousands separators, e.g. `"$9,839.64"`.
fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Mask an account id down to its first and last four characters.
fn mask_account(account: &str) -> String {
    let head: String = account.chars().take(4).collect();
    let chars: Vec<char> = account.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TransactionRecord;
    use crate::hamiltonian::VECTOR_WIDTH;

    fn test_engine(rows: usize) -> ScoringEngine {
        let vectors = (0..rows).map(|i| vec![i as f64 * 0.01; VECTOR_WIDTH]).collect();
        let records = (0..rows)
            .map(|i| TransactionRecord {
                amount: 100.0 + i as f64,
                origin: format!("C{:09}", 100_000_000 + i),
                destination: format!("M{:09}", 200_000_000 + i),
                out_degree: 1,
                in_degree: 1,
                is_fraud: i % 10 == 0,
            })
            .collect();
        let dataset = Dataset::from_parts(vectors, records).unwrap();
        let projection = ProjectionMatrix::from_rows(vec![[0.05, -0.02, 0.01]; VECTOR_WIDTH]);
        ScoringEngine::new(dataset, projection)
    }

    #[test]
    fn transaction_id_uses_the_offset() {
        let engine = test_engine(50);
        assert_eq!(engine.transaction_id(45), "TX-10045");
        assert_eq!(engine.transaction_id(0), "TX-10000");
    }

    #[test]
    fn parse_round_trips_ids() {
        assert_eq!(parse_transaction_id("TX-10045"), Some(45));
        assert_eq!(parse_transaction_id("TX-10000"), Some(0));
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert_eq!(parse_transaction_id("10045"), None);
        assert_eq!(parse_transaction_id("TX-abc"), None);
        assert_eq!(parse_transaction_id("TX-9999"), None, "below the offset");
        assert_eq!(parse_transaction_id(""), None);
    }

    #[test]
    fn score_id_resolves_within_bounds() {
        let engine = test_engine(50);
        let artifact = engine.score_id("TX-10045").unwrap();
        assert_eq!(artifact.transaction.id, "TX-10045");
    }

    #[test]
    fn score_id_rejects_out_of_bounds_without_wrapping() {
        let engine = test_engine(50);
        assert!(matches!(
            engine.score_id("TX-10050"),
            Err(ScoreError::NotFound(_))
        ));
        assert!(matches!(
            engine.score_id("TX-99999999"),
            Err(ScoreError::NotFound(_))
        ));
    }

    #[test]
    fn score_index_wraps_to_the_same_transaction() {
        let engine = test_engine(50);
        let a = engine.score_index(0).unwrap();
        let b = engine.score_index(50).unwrap();
        assert_eq!(a.transaction.id, b.transaction.id);
        assert_eq!(a.topology.nodes.len(), b.topology.nodes.len());
    }

    #[test]
    fn fraud_rows_take_the_biased_path() {
        let engine = test_engine(50);
        // Row 0 is fraud; screening is clipped to [0.70, 0.98] > cutoff.
        let artifact = engine.score_index(0).unwrap();
        assert!(artifact.transaction.is_fraud);
        assert_eq!(artifact.transaction.kind, "Transfer");
        assert_eq!(artifact.screening.decision, "Suspicious");
        assert_eq!(artifact.quantum_forecast.status, RiskStatus::Critical);
        assert!(artifact.quantum_forecast.energy < -1.5);
    }

    #[test]
    fn legitimate_rows_stay_stable() {
        let engine = test_engine(50);
        let artifact = engine.score_index(1).unwrap();
        assert!(!artifact.transaction.is_fraud);
        assert_eq!(artifact.transaction.kind, "Payment");
        assert_eq!(artifact.screening.decision, "Safe");
        assert_eq!(artifact.quantum_forecast.status, RiskStatus::Stable);
        assert_eq!(artifact.quantum_forecast.risk_score, 0.0);
    }

    #[test]
    fn display_terms_match_the_energy_path_bias() {
        let engine = test_engine(50);
        let artifact = engine.score_index(0).unwrap();
        let zi = &artifact.quantum_forecast.hamiltonian[0];
        assert_eq!(zi.term, "ZI");
        // Biased path: ZI must carry the screening bias, several units up.
        assert!(zi.coeff > 2.0, "ZI coefficient {} missing bias", zi.coeff);
    }

    #[test]
    fn shape_mismatch_is_a_typed_per_request_error() {
        let vectors = vec![vec![0.0; 12]; 2];
        let records = (0..2)
            .map(|i| TransactionRecord {
                amount: 1.0,
                origin: format!("C{i}"),
                destination: format!("M{i}"),
                out_degree: 1,
                in_degree: 1,
                is_fraud: false,
            })
            .collect();
        let dataset = Dataset::from_parts(vectors, records).unwrap();
        let projection = ProjectionMatrix::from_rows(vec![[0.0; 3]; VECTOR_WIDTH]);
        let engine = ScoringEngine::new(dataset, projection);
        assert!(matches!(
            engine.score_index(0),
            Err(ScoreError::ShapeMismatch {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn listing_marks_fraud_as_flagged() {
        let engine = test_engine(20);
        let rows = engine.list_transactions(5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].status, "Flagged");
        assert_eq!(rows[1].status, "Posted");
        assert_eq!(rows[0].id, "TX-10000");
    }

    #[test]
    fn listing_limit_caps_at_dataset_size() {
        let engine = test_engine(3);
        assert_eq!(engine.list_transactions(100).len(), 3);
    }

    #[test]
    fn artifact_serializes_with_expected_shape() {
        let engine = test_engine(50);
        let artifact = engine.score_index(7).unwrap();
        let json = serde_json::to_value(&artifact).unwrap();
        assert!(json["transaction"]["type"].is_string());
        assert!(json["screening"]["vector_magnitude"].is_number());
        assert_eq!(json["quantum_forecast"]["circuit_depth"], 15);
        assert_eq!(
            json["quantum_forecast"]["hamiltonian"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
        assert_eq!(json["benchmark"]["model_name"], "XGBoost (Vector-Based)");
    }

    #[test]
    fn benchmark_score_is_rounded_to_four_decimals() {
        let engine = test_engine(50);
        let artifact = engine.score_index(3).unwrap();
        let scaled = artifact.benchmark.score * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(9839.64), "$9,839.64");
        assert_eq!(format_amount(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_amount(0.5), "$0.50");
        assert_eq!(format_amount(-75.0), "-$75.00");
    }

    #[test]
    fn mask_account_keeps_head_and_tail() {
        assert_eq!(mask_account("C1231006815"), "C123...6815");
        assert_eq!(mask_account("C12"), "C12...C12");
    }

    #[test]
    fn screening_score_stays_in_its_bands() {
        let mut rng = rand::rng();
        for _ in 0..2_000 {
            let fraud = screening_score(true, &mut rng);
            assert!((0.70..=0.98).contains(&fraud));
            let legit = screening_score(false, &mut rng);
            assert!((0.02..=0.35).contains(&legit));
        }
    }
}

//! Persisted transaction dataset and projection artifacts.
//!
//! The engine loads two JSON artifacts once at startup and never mutates
//! them afterwards:
//!
//! - `test_set.json`: feature vectors, binary labels, and per-transaction
//!   metadata (amount, parties, degree counts)
//! - `projection_matrix.json`: the shared 16×3 projection matrix
//!
//! All index access wraps modulo the dataset size, so a monotonically
//! advancing feed cursor can run forever over a finite set. When the
//! artifacts cannot be loaded the engine falls back to a synthetic dataset
//! of the same shape (see [`synthetic_fallback`]) and surfaces that through
//! an explicit degraded flag rather than crashing or silently serving mock
//! data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;
use crate::hamiltonian::{ENERGY_TERMS, ProjectionMatrix, VECTOR_WIDTH};
use crate::noise::standard_normal;

/// Dataset artifact file name.
pub const TEST_SET_FILE: &str = "test_set.json";
/// Projection matrix artifact file name.
pub const PROJECTION_FILE: &str = "projection_matrix.json";
/// Row count of the synthetic fallback dataset.
pub const SYNTHETIC_ROWS: usize = 450;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One transaction's persistent metadata. Loaded once, never mutated.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub amount: f64,
    /// Originating account id (e.g. `"C1231006815"`).
    pub origin: String,
    /// Destination account id.
    pub destination: String,
    /// How many accounts the sender transacts with.
    pub out_degree: u32,
    /// How many accounts send to the receiver.
    pub in_degree: u32,
    pub is_fraud: bool,
}

/// Immutable, index-addressable transaction set.
#[derive(Debug)]
pub struct Dataset {
    vectors: Vec<Vec<f64>>,
    records: Vec<TransactionRecord>,
}

impl Dataset {
    /// Assemble a dataset, validating shape invariants.
    ///
    /// Vectors and records must be equal-length, non-empty, and every vector
    /// must share one width.
    pub fn from_parts(
        vectors: Vec<Vec<f64>>,
        records: Vec<TransactionRecord>,
    ) -> Result<Self, DataLoadError> {
        if vectors.is_empty() {
            return Err(DataLoadError::Malformed("dataset has no rows".into()));
        }
        if vectors.len() != records.len() {
            return Err(DataLoadError::Malformed(format!(
                "{} vectors but {} metadata rows",
                vectors.len(),
                records.len()
            )));
        }
        let width = vectors[0].len();
        if let Some(bad) = vectors.iter().position(|v| v.len() != width) {
            return Err(DataLoadError::Malformed(format!(
                "vector {bad} has width {}, expected {width}",
                vectors[bad].len()
            )));
        }
        Ok(Self { vectors, records })
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Width of every feature vector in the set.
    pub fn vector_width(&self) -> usize {
        self.vectors[0].len()
    }

    /// Record and feature vector at `index`, taken modulo the dataset size.
    pub fn get(&self, index: usize) -> (&TransactionRecord, &[f64]) {
        let idx = index % self.records.len();
        (&self.records[idx], &self.vectors[idx])
    }

    /// Aggregate statistics over the whole set.
    pub fn analytics(&self) -> DatasetAnalytics {
        let mut fraud_count = 0;
        let mut total_volume = 0.0;
        let mut fraud_volume = 0.0;
        for record in &self.records {
            total_volume += record.amount;
            if record.is_fraud {
                fraud_count += 1;
                fraud_volume += record.amount;
            }
        }
        DatasetAnalytics {
            total_transactions: self.records.len(),
            fraud_count,
            total_volume,
            fraud_volume,
        }
    }
}

/// Aggregate dataset statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetAnalytics {
    pub total_transactions: usize,
    pub fraud_count: usize,
    pub total_volume: f64,
    pub fraud_volume: f64,
}

// ---------------------------------------------------------------------------
// Artifact loading
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TestSetFile {
    vectors: Vec<Vec<f64>>,
    labels: Vec<u8>,
    details: Vec<DetailRow>,
}

/// On-disk metadata row. Field names match the exported artifact columns.
#[derive(Deserialize)]
struct DetailRow {
    amount: f64,
    #[serde(rename = "nameOrig")]
    name_orig: String,
    #[serde(rename = "nameDest")]
    name_dest: String,
    #[serde(rename = "nameOrig_outDegree")]
    out_degree: u32,
    #[serde(rename = "nameDest_inDegree")]
    in_degree: u32,
}

/// Load both startup artifacts from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<(Dataset, ProjectionMatrix), DataLoadError> {
    let test_set: TestSetFile = read_json(&dir.join(TEST_SET_FILE))?;
    let projection: ProjectionMatrix = read_json(&dir.join(PROJECTION_FILE))?;

    if test_set.labels.len() != test_set.vectors.len() {
        return Err(DataLoadError::Malformed(format!(
            "{} labels for {} vectors",
            test_set.labels.len(),
            test_set.vectors.len()
        )));
    }

    let records = test_set
        .details
        .into_iter()
        .zip(&test_set.labels)
        .map(|(row, &label)| TransactionRecord {
            amount: row.amount,
            origin: row.name_orig,
            destination: row.name_dest,
            out_degree: row.out_degree,
            in_degree: row.in_degree,
            is_fraud: label == 1,
        })
        .collect();

    let dataset = Dataset::from_parts(test_set.vectors, records)?;
    if projection.row_count() != dataset.vector_width() {
        return Err(DataLoadError::Malformed(format!(
            "projection matrix has {} rows for vectors of width {}",
            projection.row_count(),
            dataset.vector_width()
        )));
    }
    Ok((dataset, projection))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Synthetic fallback
// ---------------------------------------------------------------------------

/// Build the equivalently shaped synthetic dataset used when loading fails:
/// 450 standard-normal vectors, a random 16×3 projection, all-zero labels.
pub fn synthetic_fallback() -> (Dataset, ProjectionMatrix) {
    let mut rng = rand::rng();

    let vectors: Vec<Vec<f64>> = (0..SYNTHETIC_ROWS)
        .map(|_| (0..VECTOR_WIDTH).map(|_| standard_normal(&mut rng)).collect())
        .collect();

    let records: Vec<TransactionRecord> = (0..SYNTHETIC_ROWS)
        .map(|_| {
            use rand::Rng;
            TransactionRecord {
                amount: rng.random_range(100.0..25_000.0),
                origin: format!("C{:09}", rng.random_range(0u32..1_000_000_000)),
                destination: format!("M{:09}", rng.random_range(0u32..1_000_000_000)),
                out_degree: 1,
                in_degree: 1,
                is_fraud: false,
            }
        })
        .collect();

    let rows = (0..VECTOR_WIDTH)
        .map(|_| {
            let mut row = [0.0; ENERGY_TERMS];
            for slot in row.iter_mut() {
                *slot = standard_normal(&mut rng);
            }
            row
        })
        .collect();

    let dataset = Dataset::from_parts(vectors, records)
        .expect("synthetic dataset construction is infallible");
    (dataset, ProjectionMatrix::from_rows(rows))
}

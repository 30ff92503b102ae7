//! Hamiltonian construction from transaction feature vectors.
//!
//! A 16-element feature vector is projected through a fixed 16×3 matrix into
//! three energy-term coefficients (ZI, IZ, ZZ) describing a two-qubit energy
//! landscape. A classical screening score above [`SCREENING_CUTOFF`] warps
//! the landscape by biasing the ZI term; that bias is what separates the
//! fraud and normal energy regimes by several units.
//!
//! **ALL** coefficient computation lives in [`build_coefficients`]. The
//! orchestrator calls it once for the energy path and once more for the
//! labeled display terms; there is no second inline copy of the math.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Feature vector width expected by every projection matrix in the system.
pub const VECTOR_WIDTH: usize = 16;

/// Number of energy terms produced by the projection.
pub const ENERGY_TERMS: usize = 3;

/// Screening score above which the classical bias is injected.
///
/// Calibration constant: together with [`BIAS_GAIN`] it pushes biased
/// landscapes several units below unbiased ones.
pub const SCREENING_CUTOFF: f64 = 0.5;

/// Multiplier applied to the screening score when biasing the ZI term.
pub const BIAS_GAIN: f64 = 4.0;

// ---------------------------------------------------------------------------
// Projection matrix
// ---------------------------------------------------------------------------

/// Fixed 16×3 projection matrix. Loaded once at startup, read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionMatrix {
    rows: Vec<[f64; ENERGY_TERMS]>,
}

impl ProjectionMatrix {
    /// Build from row-major data.
    pub fn from_rows(rows: Vec<[f64; ENERGY_TERMS]>) -> Self {
        Self { rows }
    }

    /// Number of rows (the feature vector width this matrix accepts).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Vector-matrix product: `v · P`, length [`ENERGY_TERMS`].
    ///
    /// Fails with [`ScoreError::ShapeMismatch`] when the vector length
    /// disagrees with the row count.
    pub fn project(&self, vector: &[f64]) -> Result<[f64; ENERGY_TERMS], ScoreError> {
        if vector.len() != self.rows.len() {
            return Err(ScoreError::ShapeMismatch {
                expected: self.rows.len(),
                actual: vector.len(),
            });
        }
        let mut out = [0.0; ENERGY_TERMS];
        for (x, row) in vector.iter().zip(&self.rows) {
            for (acc, coeff) in out.iter_mut().zip(row) {
                *acc += x * coeff;
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

/// Ephemeral Hamiltonian coefficient triple, recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HamiltonianCoefficients {
    /// ZI term (qubit 1 bias). Receives the classical bias when active.
    pub zi: f64,
    /// IZ term (qubit 2 bias).
    pub iz: f64,
    /// ZZ term (entanglement cost).
    pub zz: f64,
    /// Whether the screening score exceeded the cutoff and biased `zi`.
    pub bias_applied: bool,
}

/// Project a feature vector and apply the classical screening bias.
///
/// This is the single gateway for coefficient computation. `screening` above
/// [`SCREENING_CUTOFF`] adds `screening * BIAS_GAIN` to the ZI term.
pub fn build_coefficients(
    vector: &[f64],
    projection: &ProjectionMatrix,
    screening: f64,
) -> Result<HamiltonianCoefficients, ScoreError> {
    let [mut zi, iz, zz] = projection.project(vector)?;
    let bias_applied = screening > SCREENING_CUTOFF;
    if bias_applied {
        zi += screening * BIAS_GAIN;
    }
    Ok(HamiltonianCoefficients {
        zi,
        iz,
        zz,
        bias_applied,
    })
}

// ---------------------------------------------------------------------------
// Labeled display terms
// ---------------------------------------------------------------------------

/// One labeled Hamiltonian term for the forensic artifact.
#[derive(Debug, Clone, Serialize)]
pub struct HamiltonianTerm {
    pub term: &'static str,
    pub coeff: f64,
    pub desc: &'static str,
}

/// Expand coefficients into the fixed three-term display structure.
pub fn labeled_terms(coeffs: &HamiltonianCoefficients) -> [HamiltonianTerm; ENERGY_TERMS] {
    [
        HamiltonianTerm {
            term: "ZI",
            coeff: coeffs.zi,
            desc: "Qubit 1 Bias",
        },
        HamiltonianTerm {
            term: "IZ",
            coeff: coeffs.iz,
            desc: "Qubit 2 Bias",
        },
        HamiltonianTerm {
            term: "ZZ",
            coeff: coeffs.zz,
            desc: "Entanglement Cost",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_ish_matrix() -> ProjectionMatrix {
        // First three rows pick out the first three vector elements.
        let mut rows = vec![[0.0; ENERGY_TERMS]; VECTOR_WIDTH];
        rows[0][0] = 1.0;
        rows[1][1] = 1.0;
        rows[2][2] = 1.0;
        ProjectionMatrix::from_rows(rows)
    }

    fn unit_vector() -> Vec<f64> {
        let mut v = vec![0.0; VECTOR_WIDTH];
        v[0] = 2.0;
        v[1] = -1.5;
        v[2] = 0.5;
        v
    }

    #[test]
    fn projection_is_vector_matrix_product() {
        let m = identity_ish_matrix();
        let out = m.project(&unit_vector()).unwrap();
        assert_eq!(out, [2.0, -1.5, 0.5]);
    }

    #[test]
    fn projection_rejects_wrong_width() {
        let m = identity_ish_matrix();
        let err = m.project(&[1.0, 2.0, 3.0]).unwrap_err();
        match err {
            ScoreError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, VECTOR_WIDTH);
                assert_eq!(actual, 3);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn low_screening_leaves_coefficients_unbiased() {
        let m = identity_ish_matrix();
        let c = build_coefficients(&unit_vector(), &m, 0.15).unwrap();
        assert!(!c.bias_applied);
        assert_eq!(c.zi, 2.0);
    }

    #[test]
    fn cutoff_is_exclusive() {
        let m = identity_ish_matrix();
        let c = build_coefficients(&unit_vector(), &m, SCREENING_CUTOFF).unwrap();
        assert!(!c.bias_applied, "score exactly at the cutoff must not bias");
    }

    #[test]
    fn high_screening_biases_only_the_zi_term() {
        let m = identity_ish_matrix();
        let c = build_coefficients(&unit_vector(), &m, 0.9).unwrap();
        assert!(c.bias_applied);
        assert!((c.zi - (2.0 + 0.9 * BIAS_GAIN)).abs() < 1e-12);
        assert_eq!(c.iz, -1.5);
        assert_eq!(c.zz, 0.5);
    }

    #[test]
    fn same_inputs_give_identical_coefficients() {
        // The orchestrator calls this twice per request; both calls must agree.
        let m = identity_ish_matrix();
        let a = build_coefficients(&unit_vector(), &m, 0.82).unwrap();
        let b = build_coefficients(&unit_vector(), &m, 0.82).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn labeled_terms_use_fixed_labels() {
        let c = HamiltonianCoefficients {
            zi: 1.0,
            iz: 2.0,
            zz: 3.0,
            bias_applied: false,
        };
        let terms = labeled_terms(&c);
        assert_eq!(terms[0].term, "ZI");
        assert_eq!(terms[0].desc, "Qubit 1 Bias");
        assert_eq!(terms[1].term, "IZ");
        assert_eq!(terms[2].term, "ZZ");
        assert_eq!(terms[2].desc, "Entanglement Cost");
        assert_eq!(terms[1].coeff, 2.0);
    }

    #[test]
    fn projection_matrix_serde_round_trip() {
        let m = identity_ish_matrix();
        let json = serde_json::to_string(&m).unwrap();
        let back: ProjectionMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.row_count(), VECTOR_WIDTH);
        assert_eq!(back.project(&unit_vector()).unwrap(), [2.0, -1.5, 0.5]);
    }
}

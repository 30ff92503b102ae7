//! # fraudlens-core
//!
//! **Quantum-inspired fraud scoring over real transaction vectors.**
//!
//! `fraudlens-core` scores financial transactions by projecting each 16-element
//! feature vector into a two-qubit energy landscape, biasing that landscape
//! with a classical pre-screen, and simulating the ground state the landscape
//! would collapse into. Every score ships as a forensic artifact that also
//! carries a network-topology profile and an independent classical-baseline
//! comparison.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use fraudlens_core::ScoringEngine;
//!
//! // Load artifacts (or fall back to synthetic data, observably degraded).
//! let engine = ScoringEngine::open(Path::new("data"));
//!
//! let artifact = engine.score_index(45).unwrap();
//! println!(
//!     "{} -> {} (energy {:.2})",
//!     artifact.transaction.id,
//!     artifact.quantum_forecast.status,
//!     artifact.quantum_forecast.energy,
//! );
//!
//! // The same path serves id lookups.
//! let same = engine.score_id("TX-10045").unwrap();
//! assert_eq!(same.transaction.id, artifact.transaction.id);
//! ```
//!
//! ## Architecture
//!
//! Dataset → Screening → Hamiltonian → Energy/Measurement → Topology →
//! Benchmark → ForensicArtifact
//!
//! One pipeline serves both callers: the continuous feed ([`feed`]) and
//! on-demand lookups run the identical path through [`ScoringEngine`]. The
//! dataset and projection matrix are loaded once and never mutated, so any
//! number of concurrent readers query them without locking; all per-request
//! state (coefficients, forecasts, distributions) is constructed and
//! discarded per call.
//!
//! The iterative optimizer a real eigensolver would run is replaced with
//! closed-form simulation: scoring is pure computation with bounded latency,
//! suitable for a live feed.

pub mod benchmark;
pub mod dataset;
pub mod error;
pub mod feed;
pub mod forecast;
pub mod hamiltonian;
pub mod measurement;
pub mod noise;
pub mod pipeline;
pub mod topology;

pub use benchmark::{BenchmarkVerdict, MODEL_NAME, classical_benchmark};
pub use dataset::{
    Dataset, DatasetAnalytics, TransactionRecord, load_artifacts, synthetic_fallback,
};
pub use error::{DataLoadError, ScoreError};
pub use feed::{FeedConfig, FeedHandle, spawn_feed};
pub use forecast::{EnergyForecast, RiskStatus, classify, forecast_ground_state};
pub use hamiltonian::{
    HamiltonianCoefficients, HamiltonianTerm, ProjectionMatrix, build_coefficients, labeled_terms,
};
pub use measurement::{BASIS_LABELS, MeasurementDistribution, sample_distribution};
pub use pipeline::{
    ForensicArtifact, ScoringEngine, TransactionListing, parse_transaction_id,
};
pub use topology::{ConnectivityClass, TopologyProfile, classify_pattern, profile_topology};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

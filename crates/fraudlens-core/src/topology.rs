//! Transaction network topology classification.
//!
//! Derives a qualitative connectivity pattern and a synthetic neighbor set
//! from the real degree metadata recorded with each transaction. Degree
//! thresholds follow the observed data distribution: most fraud sits at
//! out-degree 1-2 and in-degree 1-4, and genuinely high-connectivity rings
//! are rare.
//!
//! Neighbor identifiers must be reproducible for audit: the same (origin,
//! index) pair always yields the same neighbor list. Suffixes come from
//! SHA-256 over (origin, index, position), never from process-randomized
//! state.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Degree at or above which a party is treated as a star hub.
pub const HUB_DEGREE: u32 = 8;
/// Degree at or above which a pattern is treated as fan-out distribution.
pub const FAN_DEGREE: u32 = 4;
/// Cap on the synthetic neighbor set.
pub const NEIGHBOR_CAP: u32 = 8;

/// Risk attributed to neighbors of a high-connectivity hub.
pub const MULE_RISK: f64 = 0.85;
/// Risk attributed to ordinary peers.
pub const PEER_RISK: f64 = 0.15;

// ---------------------------------------------------------------------------
// Pattern classification
// ---------------------------------------------------------------------------

/// Connectivity class behind a pattern label. Drives neighbor risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityClass {
    HighConnectivity,
    MediumConnectivity,
    LowConnectivity,
    Normal,
}

impl std::fmt::Display for ConnectivityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighConnectivity => write!(f, "high_connectivity"),
            Self::MediumConnectivity => write!(f, "medium_connectivity"),
            Self::LowConnectivity => write!(f, "low_connectivity"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Classify a degree pair into its pattern label and connectivity class.
///
/// Rules are priority-ordered: star hub, then fan-out, then strict P2P,
/// then the small-network default.
pub fn classify_pattern(out_degree: u32, in_degree: u32) -> (&'static str, ConnectivityClass) {
    if out_degree >= HUB_DEGREE || in_degree >= HUB_DEGREE {
        ("Star-Hub (Mule)", ConnectivityClass::HighConnectivity)
    } else if out_degree >= FAN_DEGREE || in_degree >= FAN_DEGREE {
        ("Fan-Out (Distribution)", ConnectivityClass::MediumConnectivity)
    } else if out_degree == 1 && in_degree == 1 {
        ("Linear (P2P)", ConnectivityClass::LowConnectivity)
    } else {
        ("Small Network", ConnectivityClass::Normal)
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// One synthetic neighbor in the transaction's local graph.
#[derive(Debug, Clone, Serialize)]
pub struct NeighborNode {
    pub id: String,
    pub relationship: &'static str,
    pub risk: f64,
    pub degree: u32,
}

/// Raw degree metrics accompanying a profile.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TopologyMetrics {
    pub source_degree: u32,
    pub dest_degree: u32,
    pub connectivity_score: f64,
}

/// Qualitative connectivity profile for one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyProfile {
    pub pattern: &'static str,
    pub neighbor_count: u32,
    pub nodes: Vec<NeighborNode>,
    pub metrics: TopologyMetrics,
}

/// Build the topology profile for a transaction.
///
/// `neighbor_count = min(max(out, in), NEIGHBOR_CAP)`. Each neighbor carries
/// the out-degree while positions remain below it, then the in-degree.
pub fn profile_topology(
    origin: &str,
    index: usize,
    out_degree: u32,
    in_degree: u32,
) -> TopologyProfile {
    let (pattern, class) = classify_pattern(out_degree, in_degree);
    let neighbor_count = out_degree.max(in_degree).min(NEIGHBOR_CAP);

    let (relationship, risk) = if class == ConnectivityClass::HighConnectivity {
        ("Mule", MULE_RISK)
    } else {
        ("Peer", PEER_RISK)
    };

    let prefix: String = origin.chars().take(4).collect();
    let nodes = (0..neighbor_count)
        .map(|i| NeighborNode {
            id: format!("{prefix}...{:04}", neighbor_suffix(origin, index, i)),
            relationship,
            risk,
            degree: if i < out_degree { out_degree } else { in_degree },
        })
        .collect();

    TopologyProfile {
        pattern,
        neighbor_count,
        nodes,
        metrics: TopologyMetrics {
            source_degree: out_degree,
            dest_degree: in_degree,
            connectivity_score: f64::from(out_degree + in_degree) / 2.0,
        },
    }
}

/// Stable 4-digit suffix for neighbor `i` of (origin, index).
fn neighbor_suffix(origin: &str, index: usize, i: u32) -> u16 {
    let mut h = Sha256::new();
    h.update(origin.as_bytes());
    h.update((index as u64).to_le_bytes());
    h.update(i.to_le_bytes());
    let digest = h.finalize();
    u16::from_le_bytes([digest[0], digest[1]]) % 10_000
}

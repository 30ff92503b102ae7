//! Continuous risk feed.
//!
//! A tokio task walks the dataset through the shared [`ScoringEngine`] and
//! emits one [`ForensicArtifact`] per tick on an mpsc channel. This loop owns
//! the system's only pacing point: everything below it is pure bounded
//! computation.
//!
//! The cursor is an `Arc<AtomicUsize>` owned by the caller. The task reads
//! and advances it but never resets it, so a consumer that disconnects and
//! spawns a new feed over the same cursor resumes from the last processed
//! index instead of replaying from zero.
//!
//! Failure policy: a failed scoring is logged and the cursor advances to the
//! next index; one bad row never terminates the feed. A closed receiver
//! ends the task without advancing past unsent work.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::forecast::RiskStatus;
use crate::pipeline::{ForensicArtifact, ScoringEngine};

/// Emit an info line for every nth artifact (and for every CRITICAL one).
const LOG_CADENCE: usize = 5;

/// Pacing and channel configuration for the feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Delay after a non-critical artifact.
    pub base_interval: Duration,
    /// Delay after a CRITICAL artifact, giving consumers time to react.
    pub critical_interval: Duration,
    /// Output channel capacity.
    pub channel_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_secs(2),
            critical_interval: Duration::from_secs(4),
            channel_capacity: 16,
        }
    }
}

/// Handle to a running feed task.
pub struct FeedHandle {
    cursor: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Index the feed will process next.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }

    /// Stop the task immediately.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the task to finish (it ends when the receiver is dropped).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawn the feed over a shared engine and cursor.
///
/// Returns the handle and the artifact receiver. Dropping the receiver shuts
/// the feed down cleanly on its next send.
pub fn spawn_feed(
    engine: Arc<ScoringEngine>,
    cursor: Arc<AtomicUsize>,
    config: FeedConfig,
) -> (FeedHandle, mpsc::Receiver<ForensicArtifact>) {
    let (tx, rx) = mpsc::channel(config.channel_capacity);
    let task_cursor = Arc::clone(&cursor);

    let task = tokio::spawn(async move {
        loop {
            let index = task_cursor.load(Ordering::SeqCst);
            match engine.score_index(index) {
                Ok(artifact) => {
                    let critical = artifact.quantum_forecast.status == RiskStatus::Critical;
                    if critical || index % LOG_CADENCE == 0 {
                        log::info!(
                            "processed {} | {} | {} (energy {:.2})",
                            artifact.transaction.id,
                            artifact.transaction.kind,
                            artifact.quantum_forecast.status,
                            artifact.quantum_forecast.energy,
                        );
                    }
                    if artifact.benchmark.blindspot_detected {
                        log::info!(
                            "classical blindspot on {}: {} ({} nodes)",
                            artifact.transaction.id,
                            artifact.topology.pattern,
                            artifact.topology.neighbor_count,
                        );
                    }

                    if tx.send(artifact).await.is_err() {
                        // Receiver gone; leave the cursor on the unsent index.
                        log::info!("feed consumer disconnected at index {index}");
                        break;
                    }
                    task_cursor.store(index + 1, Ordering::SeqCst);

                    let pace = if critical {
                        config.critical_interval
                    } else {
                        config.base_interval
                    };
                    tokio::time::sleep(pace).await;
                }
                Err(err) => {
                    log::warn!("scoring failed at index {index}: {err}; advancing");
                    task_cursor.store(index + 1, Ordering::SeqCst);
                }
            }
        }
    });

    (FeedHandle { cursor, task }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, TransactionRecord};
    use crate::hamiltonian::{ProjectionMatrix, VECTOR_WIDTH};

    fn fast_config() -> FeedConfig {
        FeedConfig {
            base_interval: Duration::from_millis(1),
            critical_interval: Duration::from_millis(1),
            channel_capacity: 4,
        }
    }

    fn engine(rows: usize) -> Arc<ScoringEngine> {
        let vectors = (0..rows).map(|_| vec![0.1; VECTOR_WIDTH]).collect();
        let records = (0..rows)
            .map(|i| TransactionRecord {
                amount: 50.0,
                origin: format!("C{:09}", i),
                destination: format!("M{:09}", i),
                out_degree: 1,
                in_degree: 1,
                is_fraud: false,
            })
            .collect();
        let dataset = Dataset::from_parts(vectors, records).unwrap();
        let projection = ProjectionMatrix::from_rows(vec![[0.01; 3]; VECTOR_WIDTH]);
        Arc::new(ScoringEngine::new(dataset, projection))
    }

    #[tokio::test]
    async fn feed_emits_artifacts_in_index_order() {
        let cursor = Arc::new(AtomicUsize::new(0));
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.transaction.id, "TX-10000");
        assert_eq!(second.transaction.id, "TX-10001");

        handle.abort();
    }

    #[tokio::test]
    async fn dropping_the_receiver_stops_the_task() {
        let cursor = Arc::new(AtomicUsize::new(0));
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());

        let _ = rx.recv().await.unwrap();
        drop(rx);
        handle.join().await;
    }

    #[tokio::test]
    async fn cursor_resumes_across_reconnects() {
        let cursor = Arc::new(AtomicUsize::new(0));
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());

        let _ = rx.recv().await.unwrap();
        let _ = rx.recv().await.unwrap();
        drop(rx);
        handle.join().await;

        let resumed_at = cursor.load(Ordering::SeqCst);
        assert!(resumed_at >= 2, "cursor reset to {resumed_at}");

        // Reconnect: a fresh feed over the same cursor continues, not restarts.
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());
        let next = rx.recv().await.unwrap();
        assert_ne!(next.transaction.id, "TX-10000");
        handle.abort();
    }

    #[tokio::test]
    async fn feed_starts_from_a_preset_cursor() {
        let cursor = Arc::new(AtomicUsize::new(7));
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());
        let artifact = rx.recv().await.unwrap();
        assert_eq!(artifact.transaction.id, "TX-10007");
        handle.abort();
    }

    #[tokio::test]
    async fn feed_wraps_past_the_dataset_end() {
        let cursor = Arc::new(AtomicUsize::new(9));
        let (handle, mut rx) = spawn_feed(engine(10), Arc::clone(&cursor), fast_config());
        let last = rx.recv().await.unwrap();
        let wrapped = rx.recv().await.unwrap();
        assert_eq!(last.transaction.id, "TX-10009");
        assert_eq!(wrapped.transaction.id, "TX-10000");
        assert!(cursor.load(Ordering::SeqCst) >= 10, "cursor keeps climbing");
        handle.abort();
    }
}

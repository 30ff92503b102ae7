use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use fraudlens_core::{FeedConfig, spawn_feed};

pub fn run(data_dir: &str, limit: usize, start: usize, json: bool, pace_ms: u64) {
    let engine = Arc::new(super::make_engine(data_dir));
    let cursor = Arc::new(AtomicUsize::new(start));

    let mut config = FeedConfig::default();
    if pace_ms > 0 {
        config.base_interval = Duration::from_millis(pace_ms);
        config.critical_interval = Duration::from_millis(pace_ms);
    }

    println!(
        "Streaming from index {start} over {} transactions (Ctrl-C to stop)",
        engine.len()
    );

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let (handle, mut rx) = spawn_feed(engine, Arc::clone(&cursor), config);
        let mut received = 0usize;

        loop {
            tokio::select! {
                artifact = rx.recv() => {
                    let Some(artifact) = artifact else { break };
                    if json {
                        println!("{}", serde_json::to_string(&artifact).unwrap());
                    } else {
                        let forecast = &artifact.quantum_forecast;
                        println!(
                            "{} {:<8} {:>12} {:<9} energy {:>6.2} risk {:.2} | {} {:.4}{}",
                            artifact.transaction.id,
                            artifact.transaction.kind,
                            artifact.transaction.amount,
                            forecast.status.to_string(),
                            forecast.energy,
                            forecast.risk_score,
                            artifact.benchmark.model_name,
                            artifact.benchmark.score,
                            if artifact.benchmark.blindspot_detected { "  [blindspot]" } else { "" },
                        );
                    }
                    received += 1;
                    if limit > 0 && received >= limit {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    break;
                }
            }
        }

        drop(rx);
        handle.join().await;
    });

    // The cursor survives the session; a restart with --start resumes here.
    println!(
        "Feed stopped at index {}; resume with --start {}",
        cursor.load(std::sync::atomic::Ordering::SeqCst),
        cursor.load(std::sync::atomic::Ordering::SeqCst)
    );
}

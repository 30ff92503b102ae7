pub fn run(data_dir: &str, limit: usize) {
    let engine = super::make_engine(data_dir);
    let stats = engine.analytics();

    println!("fraudlens v{}", fraudlens_core::VERSION);
    println!(
        "Dataset: {} transactions{}",
        stats.total_transactions,
        if engine.is_degraded() {
            " (DEGRADED: synthetic fallback)"
        } else {
            ""
        }
    );
    println!(
        "Fraud:   {} flagged ({:.2}% of set)",
        stats.fraud_count,
        100.0 * stats.fraud_count as f64 / stats.total_transactions as f64
    );
    println!("Volume:  ${:.2} total | ${:.2} in flagged rows", stats.total_volume, stats.fraud_volume);
    println!();

    let rows = engine.list_transactions(limit);
    println!(
        "{:<10} {:>12} {:<14} {:<14} {:<8}",
        "ID", "Amount", "Source", "Destination", "Status"
    );
    println!("{}", "-".repeat(62));
    for row in &rows {
        println!(
            "{:<10} {:>12.2} {:<14} {:<14} {:<8}",
            row.id, row.amount, row.source, row.destination, row.status
        );
    }
    if rows.len() < engine.len() {
        println!("... {} more rows", engine.len() - rows.len());
    }
}

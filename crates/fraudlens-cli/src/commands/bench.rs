use fraudlens_core::RiskStatus;

pub fn run(data_dir: &str, rounds: usize) {
    let engine = super::make_engine(data_dir);

    let mut fraud_energies = Vec::new();
    let mut normal_energies = Vec::new();
    let mut status_counts = [0usize; 3];
    let mut blindspots = 0usize;
    let mut fraud_rows = 0usize;

    for i in 0..rounds {
        let artifact = match engine.score_index(i) {
            Ok(a) => a,
            Err(err) => {
                eprintln!("round {i} failed: {err}");
                continue;
            }
        };

        let forecast = &artifact.quantum_forecast;
        if artifact.transaction.is_fraud {
            fraud_rows += 1;
            fraud_energies.push(forecast.energy);
        } else {
            normal_energies.push(forecast.energy);
        }
        status_counts[match forecast.status {
            RiskStatus::Stable => 0,
            RiskStatus::Warning => 1,
            RiskStatus::Critical => 2,
        }] += 1;
        if artifact.benchmark.blindspot_detected {
            blindspots += 1;
        }
    }

    println!("fraudlens bench: {rounds} rounds over {} transactions", engine.len());
    println!();

    let (fraud_mean, fraud_std) = super::mean_std(&fraud_energies);
    let (normal_mean, normal_std) = super::mean_std(&normal_energies);
    println!("{:<22} {:>8} {:>10} {:>10}", "Regime", "Rounds", "Mean eV", "Stdev");
    println!("{}", "-".repeat(54));
    println!(
        "{:<22} {:>8} {:>10.4} {:>10.4}",
        "biased (fraud well)",
        fraud_energies.len(),
        fraud_mean,
        fraud_std
    );
    println!(
        "{:<22} {:>8} {:>10.4} {:>10.4}",
        "unbiased (baseline)",
        normal_energies.len(),
        normal_mean,
        normal_std
    );
    println!();

    println!(
        "Status: {} STABLE | {} WARNING | {} CRITICAL",
        status_counts[0], status_counts[1], status_counts[2]
    );
    if fraud_rows > 0 {
        println!(
            "Classical blindspot: {blindspots}/{fraud_rows} fraud rounds ({:.1}%)",
            100.0 * blindspots as f64 / fraud_rows as f64
        );
    }
}

use fraudlens_core::ForensicArtifact;

pub fn run(data_dir: &str, id: Option<&str>, index: Option<usize>, json: bool) {
    let engine = super::make_engine(data_dir);

    let result = match (id, index) {
        (Some(id), _) => engine.score_id(id),
        (None, Some(index)) => engine.score_index(index),
        (None, None) => {
            eprintln!("Provide --id TX-10045 or --index 45");
            std::process::exit(2);
        }
    };

    match result {
        Ok(artifact) if json => {
            println!("{}", serde_json::to_string_pretty(&artifact).unwrap());
        }
        Ok(artifact) => print_artifact(&artifact),
        Err(err) => {
            eprintln!("Investigation failed: {err}");
            std::process::exit(1);
        }
    }
}

fn print_artifact(artifact: &ForensicArtifact) {
    let tx = &artifact.transaction;
    let forecast = &artifact.quantum_forecast;

    println!("{}", "=".repeat(60));
    println!("FORENSIC ARTIFACT {}", tx.id);
    println!("{}", "=".repeat(60));
    println!("Amount:    {} | Account: {} | Type: {}", tx.amount, tx.account, tx.kind);
    println!("Labeled:   {}", if tx.is_fraud { "FRAUD" } else { "legitimate" });
    println!();

    println!(
        "Screening: p={:.4} ({}) | |v|={:.3}",
        artifact.screening.probability,
        artifact.screening.decision,
        artifact.screening.vector_magnitude
    );
    println!(
        "Forecast:  {} | energy {:.3} | risk {:.3} | depth {}",
        forecast.status, forecast.energy, forecast.risk_score, forecast.circuit_depth
    );
    for term in &forecast.hamiltonian {
        println!("           {:<2} {:>9.4}  {}", term.term, term.coeff, term.desc);
    }
    println!("Measured:");
    for (label, p) in forecast.probabilities.iter() {
        println!("           {:<14} {:.4}", label, p);
    }
    println!();

    println!(
        "Topology:  {} | {} neighbor(s) | connectivity {:.1}",
        artifact.topology.pattern,
        artifact.topology.neighbor_count,
        artifact.topology.metrics.connectivity_score
    );
    for node in &artifact.topology.nodes {
        println!(
            "           {:<14} {:<5} risk {:.2} degree {}",
            node.id, node.relationship, node.risk, node.degree
        );
    }
    println!();

    let bench = &artifact.benchmark;
    println!(
        "Baseline:  {} scored {:.4}{}",
        bench.model_name,
        bench.score,
        if bench.blindspot_detected {
            "  << BLINDSPOT: classical model missed this fraud"
        } else {
            ""
        }
    );
}

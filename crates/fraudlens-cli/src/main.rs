//! CLI for fraudlens — quantum-inspired transaction risk scoring.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fraudlens")]
#[command(about = "fraudlens — quantum-inspired transaction risk scoring")]
#[command(version = fraudlens_core::VERSION)]
struct Cli {
    /// Directory containing test_set.json and projection_matrix.json
    #[arg(long, default_value = "data", global = true)]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the dataset: volumes, fraud counts, first listing rows
    Scan {
        /// Number of listing rows to print
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Deep-dive a single transaction
    Investigate {
        /// Transaction id (e.g. TX-10045); takes priority over --index
        #[arg(long)]
        id: Option<String>,

        /// Dataset index (taken modulo the dataset size)
        #[arg(long)]
        index: Option<usize>,

        /// Print the raw forensic artifact as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the continuous scoring feed
    Feed {
        /// Stop after N artifacts (0 = run until Ctrl-C)
        #[arg(long, default_value = "0")]
        limit: usize,

        /// Index to start (and resume) from
        #[arg(long, default_value = "0")]
        start: usize,

        /// Print full artifacts as JSON instead of summary lines
        #[arg(long)]
        json: bool,

        /// Override both pacing intervals, in milliseconds (0 = production pacing)
        #[arg(long, default_value = "0")]
        pace_ms: u64,
    },

    /// Score many rounds and report simulator statistics
    Bench {
        /// Number of scoring rounds
        #[arg(long, default_value = "10000")]
        rounds: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { limit } => commands::scan::run(&cli.data_dir, limit),
        Commands::Investigate { id, index, json } => {
            commands::investigate::run(&cli.data_dir, id.as_deref(), index, json)
        }
        Commands::Feed {
            limit,
            start,
            json,
            pace_ms,
        } => commands::feed::run(&cli.data_dir, limit, start, json, pace_ms),
        Commands::Bench { rounds } => commands::bench::run(&cli.data_dir, rounds),
    }
}

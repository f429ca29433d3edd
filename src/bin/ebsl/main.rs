//! ebsl CLI tool
//!
//! Computes the final referral trust matrix from a whitespace-separated
//! evidence file and writes one `<from>\t<to>\t<discount>` line per derived
//! opinion.
//!
//! ## Usage
//!
//! ```text
//! ebsl <threshold> <evidence_file> <output_file> [--config <path>]
//! ```
//!
//! `threshold` is the evidence unit `c`: the soft threshold of evidence at
//! which an opinion's uncertainty halves. The optional TOML config adjusts
//! the solver (epoch cap, tolerance, distance, aggregation).
//!
//! Exit codes: 1 for argument or input errors, 2 for output-write errors.

use clap::Parser;
use ebsl_core::{
    config::SolverConfig,
    equation::{synthesize_equations, ReferralContext},
    report::{read_evidence, write_discounts},
    solver::{solve_equations, SolverOptions},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ebsl")]
#[command(author, version, about = "Final referral trust solver for EBSL evidence graphs", long_about = None)]
struct Cli {
    /// Evidence unit `c` (positive integer)
    #[arg(allow_hyphen_values = true)]
    threshold: i64,

    /// Evidence file: one `<from> <to> <positive> <negative>` line per edge
    evidence_file: PathBuf,

    /// Output file for final referral trust discounts
    output_file: PathBuf,

    /// Optional TOML solver configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if cli.threshold <= 0 {
        eprintln!("threshold value must be positive number");
        std::process::exit(1);
    }
    let threshold = cli.threshold as u64;

    let options = match cli.config.as_deref() {
        Some(path) => match SolverConfig::load(path).and_then(|config| config.to_options()) {
            Ok(options) => options,
            Err(err) => {
                eprintln!("invalid solver config: {err}");
                std::process::exit(1);
            }
        },
        None => SolverOptions::default(),
    };

    let evidence = match read_evidence(&cli.evidence_file) {
        Ok(evidence) => evidence,
        Err(err) => {
            eprintln!("failed to read evidence file: {err}");
            std::process::exit(1);
        }
    };

    let direct = evidence.to_opinions(threshold);

    tracing::info!("Creating Final Referral Trust equations...");
    let equations = synthesize_equations(direct.links());
    tracing::info!("Final Referral Trust equations are created.");

    let mut context = ReferralContext::new(direct);
    let options = options.on_epoch_end(|epoch, error| {
        tracing::info!("Epoch {epoch} error: {error}");
        Ok(())
    });

    tracing::info!("Solving Final Referral Trust equations...");
    if let Err(err) = solve_equations(&mut context, &equations, options) {
        eprintln!("failed to solve final referral trust equations: {err}");
        std::process::exit(1);
    }
    tracing::info!("Final Referral Trust equations are solved.");

    if let Err(err) = write_discounts(&cli.output_file, &context) {
        eprintln!("failed to write final referral trust discounts: {err}");
        std::process::exit(2);
    }
    tracing::info!("Done.");
}

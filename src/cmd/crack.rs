use crate::reports;
use autoperm::api::{self, Strategy};
use autoperm::config::SearchParams;
use autoperm::optimizer::{OptimizationOptions, ProgressCallback};
use autoperm::scorer::QuadgramScorer;
use autoperm::ApResult;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    /// Ciphertext file, `-` for stdin
    pub in_file: Option<PathBuf>,

    #[arg(short, long, default_value_t = Strategy::Substitution)]
    pub strategy: Strategy,

    #[command(flatten)]
    pub search: SearchParams,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

struct CliLogger;

impl ProgressCallback for CliLogger {
    fn on_progress(&self, evaluated: u64, best_score: f64, rate: f64) -> bool {
        info!(
            "{} evaluated | best {:.4} | {:.0} evals/s",
            evaluated, best_score, rate
        );
        true
    }

    fn on_improvement(&self, iteration: usize, score: f64) {
        info!("Improvement #{}: {:.4}", iteration, score);
    }
}

/// `search` is the config file's search section with the command line laid
/// over it.
pub fn run(args: CrackArgs, search: SearchParams, scorer: Arc<QuadgramScorer>) -> ApResult<()> {
    let ciphertext = super::read_input(args.in_file.as_deref())?;
    let options = OptimizationOptions::from(&search);

    let report = api::crack(
        &ciphertext,
        args.strategy,
        scorer,
        options,
        search.seed,
        &CliLogger,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reports::print_crack_report(&report);
    }
    Ok(())
}

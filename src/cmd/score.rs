use autoperm::scorer::{FrequencyFit, Metric, QuadgramScorer};
use autoperm::{text, ApResult};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Text file, `-` for stdin
    pub in_file: Option<PathBuf>,
}

pub fn run(args: ScoreArgs, scorer: &QuadgramScorer) -> ApResult<()> {
    let input = super::read_input(args.in_file.as_deref())?;
    let symbols = text::strip(&input);

    let quadgram = scorer.score(&symbols)?;
    let windows = symbols.len().saturating_sub(3);
    let per_window = if windows > 0 {
        quadgram / windows as f64
    } else {
        0.0
    };
    let frequency = FrequencyFit::english().score(&symbols)?;

    println!("Letters:          {}", symbols.len());
    println!("Quadgram score:   {:.4}", quadgram);
    println!("Per quadgram:     {:.4}", per_window);
    println!("Frequency fit:    {:.6}", frequency);
    Ok(())
}

use autoperm::config::Config;
use autoperm::consts::DEFAULT_QUADGRAMS_PATH;
use autoperm::scorer::QuadgramScorer;
use autoperm::{ApResult, AutopermError};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

use cmd::cipher::Direction;

#[derive(Parser, Debug)]
#[command(author, version, about = "The autoperm cipher: encrypt, decrypt and crack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quadgram table used by crack and score
    #[arg(global = true, long, default_value = DEFAULT_QUADGRAMS_PATH)]
    quadgrams: String,

    /// JSON file with search settings; command-line flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Encrypt(cmd::cipher::CipherArgs),
    Decrypt(cmd::cipher::CipherArgs),
    /// Recover the key of a ciphertext
    Crack(cmd::crack::CrackArgs),
    /// Score a text against the quadgram table
    Score(cmd::score::ScoreArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn load_scorer(path: &str) -> ApResult<Arc<QuadgramScorer>> {
    info!("Loading quadgrams: {}", path);
    Ok(Arc::new(QuadgramScorer::load(path)?))
}

fn run(cli: Cli, matches: &ArgMatches) -> ApResult<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Encrypt(args) => cmd::cipher::run(args, Direction::Encrypt),
        Commands::Decrypt(args) => cmd::cipher::run(args, Direction::Decrypt),
        Commands::Crack(args) => {
            let sub_matches = matches
                .subcommand_matches("crack")
                .ok_or_else(|| AutopermError::Config("missing crack arguments".to_string()))?;
            let mut search = config.search;
            search.merge_from_cli(&args.search, sub_matches);

            let scorer = load_scorer(&cli.quadgrams)?;
            cmd::crack::run(args, search, scorer)
        }
        Commands::Score(args) => {
            let scorer = load_scorer(&cli.quadgrams)?;
            cmd::score::run(args, &scorer)
        }
    }
}

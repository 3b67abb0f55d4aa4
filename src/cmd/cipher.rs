use crate::reports;
use autoperm::cipher::{autoperm as autoperm_cipher, substitution, AutopermKeys, CipherKind};
use autoperm::config::FormatParams;
use autoperm::permutation::Permutation;
use autoperm::{text, ApResult, AutopermError};
use clap::{ArgAction, Args};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct CipherArgs {
    /// Input file, `-` for stdin
    pub in_file: Option<PathBuf>,

    /// Output file, `-` for stdout
    pub out_file: Option<PathBuf>,

    #[arg(long, default_value_t = CipherKind::Autoperm)]
    pub cipher: CipherKind,

    /// Generate random keys
    #[arg(short, long, conflicts_with = "keys")]
    pub random: bool,

    /// Keyword for one key; autoperm takes two, sigma first (`-k SIGMA -k TAU`)
    #[arg(
        short,
        long = "key",
        visible_alias = "keys",
        action = ArgAction::Append,
        value_name = "KEYWORD"
    )]
    pub keys: Vec<String>,

    /// Print the keys used
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub format: FormatParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

enum Keys {
    Single(Permutation),
    Pair(AutopermKeys),
}

fn resolve_keys(args: &CipherArgs) -> ApResult<Keys> {
    let needed = args.cipher.key_count();

    let mut perms: Vec<Permutation> = if args.random {
        let mut rng = fastrand::Rng::new();
        (0..needed).map(|_| Permutation::random(&mut rng)).collect()
    } else if args.keys.len() == needed {
        args.keys
            .iter()
            .map(|k| Permutation::from_keyword(k))
            .collect()
    } else if args.keys.is_empty() {
        return Err(AutopermError::InvalidInput(
            "no key given: use --random or --key".to_string(),
        ));
    } else {
        return Err(AutopermError::InvalidInput(format!(
            "the {} cipher takes {} key(s), got {}",
            args.cipher,
            needed,
            args.keys.len()
        )));
    };

    match args.cipher {
        CipherKind::Substitution => Ok(Keys::Single(perms.remove(0))),
        CipherKind::Autoperm => {
            let tau = perms.remove(1);
            Ok(Keys::Pair(AutopermKeys::new(perms.remove(0), tau)))
        }
    }
}

pub fn run(args: CipherArgs, direction: Direction) -> ApResult<()> {
    let keys = resolve_keys(&args)?;
    if args.random && !args.verbose {
        warn!("Random keys are not shown without --verbose");
    }

    if args.verbose {
        match &keys {
            Keys::Single(key) => {
                info!("Key: {}", key);
                eprintln!("{}", reports::key_table(key));
            }
            Keys::Pair(pair) => {
                info!("Sigma: {}", pair.sigma);
                info!("Tau:   {}", pair.tau);
                eprintln!("Sigma\n{}", reports::key_table(&pair.sigma));
                eprintln!("Tau\n{}", reports::key_table(&pair.tau));
            }
        }
    }

    let input = super::read_input(args.in_file.as_deref())?;
    let symbols = text::strip(&input);

    let output = match (&keys, direction) {
        (Keys::Single(key), Direction::Encrypt) => substitution::encrypt(&symbols, key)?,
        (Keys::Single(key), Direction::Decrypt) => substitution::decrypt(&symbols, key)?,
        (Keys::Pair(pair), Direction::Encrypt) => autoperm_cipher::encrypt(&symbols, pair)?,
        (Keys::Pair(pair), Direction::Decrypt) => autoperm_cipher::decrypt(&symbols, pair)?,
    };

    let rendered = if args.format.preserve {
        text::preserve(&input, &output)
    } else {
        text::render(&symbols, &output, &args.format)?
    };

    super::write_output(args.out_file.as_deref(), &rendered)
}

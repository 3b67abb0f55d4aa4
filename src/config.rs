use crate::consts::{BLOCK_DEFAULT, DEFAULT_UPDATE_INTERVAL, WIDTH_DEFAULT};
use crate::error::ApResult;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything that can come from a JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchParams,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ApResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Evaluations between progress reports
    #[arg(long, default_value_t = DEFAULT_UPDATE_INTERVAL)]
    pub update_interval: u64,

    /// Stop after this many candidate evaluations
    #[arg(long)]
    pub max_evaluations: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    pub max_time: Option<u64>,

    /// Seed for reproducible searches
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            max_evaluations: None,
            max_time: None,
            seed: None,
        }
    }
}

impl SearchParams {
    /// Overlays the values the user typed on the command line; defaults do not
    /// override what the config file set.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(update_interval, "update_interval");
        update_if_present!(max_evaluations, "max_evaluations");
        update_if_present!(max_time, "max_time");
        update_if_present!(seed, "seed");
    }
}

/// Output layout of the cipher commands.
#[derive(Args, Debug, Clone)]
pub struct FormatParams {
    /// Letters per block, 0 for no spaces
    #[arg(short, long, default_value_t = BLOCK_DEFAULT)]
    pub block: usize,

    /// Line width, 0 for no wrapping
    #[arg(short, long, default_value_t = WIDTH_DEFAULT)]
    pub width: usize,

    /// Interleave input lines with output lines
    #[arg(short, long)]
    pub compare: bool,

    /// Output lowercase rather than uppercase
    #[arg(short, long)]
    pub lowercase: bool,

    /// Keep the punctuation and case of the input
    #[arg(short, long, conflicts_with_all = ["block", "width", "compare", "lowercase"])]
    pub preserve: bool,
}

impl Default for FormatParams {
    fn default() -> Self {
        Self {
            block: BLOCK_DEFAULT,
            width: WIDTH_DEFAULT,
            compare: false,
            lowercase: false,
            preserve: false,
        }
    }
}

/// Number of symbols in the cipher alphabet (A..Z).
pub const ALPHABET_SIZE: usize = 26;

/// The alphabet in index order.
pub const ALPHABET: &[u8; ALPHABET_SIZE] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Entries in a quadgram table: one per 4-symbol window (26^4).
pub const QUADGRAM_TABLE_LEN: usize = ALPHABET_SIZE * ALPHABET_SIZE * ALPHABET_SIZE * ALPHABET_SIZE;

/// Number of unordered symbol pairs, i.e. distinct transpositions (26 choose 2).
pub const TRANSPOSITION_COUNT: usize = ALPHABET_SIZE * (ALPHABET_SIZE - 1) / 2;

/// English letters, most frequent first. Used to seed substitution searches.
pub const ENGLISH_FREQUENCY_ORDER: &[u8; ALPHABET_SIZE] = b"ETAOINSHRDLCUMWFGYPBVKJXQZ";

/// Relative English letter frequencies, indexed A..Z.
pub const ENGLISH_FREQUENCIES: [f64; ALPHABET_SIZE] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094, 0.06966, 0.00153,
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056,
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
];

/// Default number of evaluations between progress callbacks.
pub const DEFAULT_UPDATE_INTERVAL: u64 = 1000;

/// Default letters per output block.
pub const BLOCK_DEFAULT: usize = 4;

/// Default output line width.
pub const WIDTH_DEFAULT: usize = 80;

/// Default location of the quadgram resource.
pub const DEFAULT_QUADGRAMS_PATH: &str = "data/quadgrams.dat";

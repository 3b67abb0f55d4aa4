pub mod autoperm;
pub mod substitution;

pub use self::autoperm::AutopermKeys;

use strum_macros::{Display, EnumIter, EnumString};

/// The ciphers the binary can run.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum CipherKind {
    Autoperm,
    Substitution,
}

impl CipherKind {
    /// Number of keys (keywords or random permutations) the cipher takes.
    pub fn key_count(&self) -> usize {
        match self {
            Self::Autoperm => 2,
            Self::Substitution => 1,
        }
    }
}

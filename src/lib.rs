pub mod alphabet;
pub mod api;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod error;
pub mod optimizer;
pub mod permutation;
pub mod scorer;
pub mod text;

pub use error::{ApResult, AutopermError};
pub use permutation::Permutation;
// cmd and reports are binary modules, declared in main.rs.

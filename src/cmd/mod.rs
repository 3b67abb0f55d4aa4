pub mod cipher;
pub mod crack;
pub mod score;

use autoperm::ApResult;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads the whole input; `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> ApResult<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Writes `text` to a file, or to stdout for `None` or `-`.
pub fn write_output(path: Option<&Path>, text: &str) -> ApResult<()> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::write(p, text)?),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

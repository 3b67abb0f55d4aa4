use crate::consts::QUADGRAM_TABLE_LEN;
use crate::error::{ApResult, AutopermError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// 1-based number of the first empty line. The newline ending the last
/// line does not open another one.
fn first_blank_line(raw: &[u8]) -> Option<usize> {
    if raw.is_empty() {
        return None;
    }
    let body = raw.strip_suffix(b"\n").unwrap_or(raw);
    body.split(|&b| b == b'\n')
        .position(|line| line.strip_suffix(b"\r").unwrap_or(line).is_empty())
        .map(|idx| idx + 1)
}

/// Reads a quadgram table: one float per line, `26^4` lines, indexed by the
/// base-26 value of the window (`AAAA` first, `ZZZZ` last).
pub fn load_quadgrams<P: AsRef<Path>>(path: P) -> ApResult<Vec<f64>> {
    let path = path.as_ref();
    debug!("Loading quadgrams from: {}", path.display());

    let file = File::open(path).map_err(|e| {
        AutopermError::Config(format!(
            "Could not open quadgram table at '{}': {}",
            path.display(),
            e
        ))
    })?;

    load_quadgrams_from_reader(file)
}

pub fn load_quadgrams_from_reader<R: Read>(mut reader: R) -> ApResult<Vec<f64>> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    if let Some(line) = first_blank_line(&raw) {
        return Err(AutopermError::Config(format!(
            "quadgram line {} is blank",
            line
        )));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_slice());

    let mut table = Vec::with_capacity(QUADGRAM_TABLE_LEN);

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = row_idx + 1;

        if rec.len() != 1 {
            return Err(AutopermError::Config(format!(
                "quadgram line {}: expected one value, found {}",
                line,
                rec.len()
            )));
        }

        let field = rec[0].trim();
        let value: f64 = field.parse().map_err(|_| {
            AutopermError::Config(format!(
                "quadgram line {}: '{}' is not a number",
                line, field
            ))
        })?;

        if !value.is_finite() {
            return Err(AutopermError::Config(format!(
                "quadgram line {}: '{}' is not finite",
                line, field
            )));
        }

        table.push(value);
    }

    if table.len() != QUADGRAM_TABLE_LEN {
        return Err(AutopermError::Config(format!(
            "quadgram table has {} entries, expected {}",
            table.len(),
            QUADGRAM_TABLE_LEN
        )));
    }

    debug!("   -> Loaded {} quadgram entries.", table.len());
    Ok(table)
}

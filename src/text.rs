//! Boundary between free text and the cipher alphabet: stripping, restoring
//! punctuation and case, and laying out output in blocks and lines.

use crate::config::FormatParams;
use crate::error::{ApResult, AutopermError};

/// Keeps only ASCII letters, upper-cased.
pub fn strip(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect()
}

/// Writes `output` letters back into the punctuation and case of `original`.
///
/// Each output letter replaces the next letter of the original and takes its
/// case. Output letters beyond the original's letters are appended as they
/// are; trailing punctuation of the original (typically the final newline) is
/// kept.
pub fn preserve(original: &str, output: &[u8]) -> String {
    let mut result = String::with_capacity(original.len().max(output.len()));
    let mut chars = original.chars();

    for &letter in output {
        let mut lowercase = false;
        for ch in chars.by_ref() {
            if ch.is_ascii_alphabetic() {
                lowercase = ch.is_ascii_lowercase();
                break;
            }
            result.push(ch);
        }
        let letter = letter as char;
        result.push(if lowercase {
            letter.to_ascii_lowercase()
        } else {
            letter
        });
    }

    result.extend(chars.filter(|ch| !ch.is_ascii_alphabetic()));
    result
}

/// Splits symbols into lines of space-separated blocks.
///
/// `block == 0` inserts no spaces and `width == 0` never wraps. When both are
/// set, a line holds `(width + 1) / (block + 1)` blocks.
pub fn format_lines(symbols: &[u8], block: usize, width: usize) -> ApResult<Vec<String>> {
    let as_string = |chunk: &[u8]| String::from_utf8_lossy(chunk).into_owned();

    if block == 0 {
        if width == 0 {
            return Ok(vec![as_string(symbols)]);
        }
        return Ok(symbols.chunks(width).map(as_string).collect());
    }

    let blocks: Vec<String> = symbols.chunks(block).map(as_string).collect();

    if width == 0 {
        return Ok(vec![blocks.join(" ")]);
    }
    if width < block {
        return Err(AutopermError::InvalidInput(format!(
            "width ({}) should be >= block ({})",
            width, block
        )));
    }

    let blocks_per_line = (width + 1) / (block + 1);
    Ok(blocks
        .chunks(blocks_per_line)
        .map(|line| line.join(" "))
        .collect())
}

/// Renders cipher output for display.
///
/// In compare mode the input and output are interleaved line by line as
/// `i:` / `o:` pairs, each pair followed by a blank line.
pub fn render(input: &[u8], output: &[u8], params: &FormatParams) -> ApResult<String> {
    if params.compare && (1..=2).contains(&params.width) {
        return Err(AutopermError::InvalidInput(
            "width should be > 2 in compare mode".to_string(),
        ));
    }

    let width = if params.compare && params.width > 0 {
        params.width - 2
    } else {
        params.width
    };

    let cased = |line: &str| {
        if params.lowercase {
            line.to_lowercase()
        } else {
            line.to_uppercase()
        }
    };

    let out_lines = format_lines(output, params.block, width)?;
    let mut rendered = String::new();

    if params.compare {
        let in_lines = format_lines(input, params.block, width)?;
        let rows = in_lines.len().max(out_lines.len());
        for row in 0..rows {
            let plain = in_lines.get(row).map(String::as_str).unwrap_or("");
            let processed = out_lines.get(row).map(String::as_str).unwrap_or("");
            rendered.push_str(&format!("i:{}\n", cased(plain)));
            rendered.push_str(&format!("o:{}\n", cased(processed)));
            rendered.push('\n');
        }
    } else {
        for line in &out_lines {
            rendered.push_str(&cased(line));
            rendered.push('\n');
        }
    }

    Ok(rendered)
}

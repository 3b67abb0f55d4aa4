use autoperm::api::CrackReport;
use autoperm::consts::ALPHABET;
use autoperm::Permutation;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Plain alphabet over the key's images, one column per letter.
pub fn key_table(key: &Permutation) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let plain: Vec<Cell> = ALPHABET
        .iter()
        .map(|&b| Cell::new(b as char).set_alignment(CellAlignment::Center))
        .collect();
    let cipher: Vec<Cell> = key
        .to_string()
        .chars()
        .map(|c| {
            Cell::new(c)
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Center)
        })
        .collect();

    table.add_row(plain);
    table.add_row(cipher);
    table
}

/// Cycle notation, e.g. `(ABC)(DE)`. Fixed points are left out.
pub fn format_cycles(key: &Permutation) -> String {
    let cycles: String = key
        .cycles()
        .iter()
        .map(|c| format!("({})", String::from_utf8_lossy(c)))
        .collect();
    if cycles.is_empty() {
        "()".to_string()
    } else {
        cycles
    }
}

fn print_key(name: &str, key: &Permutation) {
    println!("\n{}: {}  {}", name, key, format_cycles(key));
    println!("{}", key_table(key));
}

pub fn print_crack_report(report: &CrackReport) {
    if let Some(key) = &report.key {
        print_key("Key", key);
    }
    if let Some(keys) = &report.keys {
        print_key("Sigma", &keys.sigma);
        print_key("Tau", &keys.tau);
    }
    if let Some(key) = &report.conversion_key {
        print_key("Conversion key", key);
    }
    if let Some(keys) = &report.implied_keys {
        print_key("Implied sigma", &keys.sigma);
        print_key("Implied tau", &keys.tau);
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Evaluated"),
        Cell::new("Improvements"),
        Cell::new("Time (s)"),
        Cell::new("Evals/s"),
        Cell::new("Stopped"),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.add_row(vec![
        Cell::new(report.strategy).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", report.score)).fg(Color::Cyan),
        Cell::new(report.evaluated),
        Cell::new(report.iterations),
        Cell::new(format!("{:.2}", report.elapsed_secs)),
        Cell::new(format!("{:.0}", report.evaluations_per_second)),
        Cell::new(report.stop_reason),
    ]);

    println!("\n{}", table);
    println!("\nPlaintext:\n{}", report.plaintext);
}

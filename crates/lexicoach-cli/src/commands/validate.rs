//! The `lexicoach validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexicoach_core::parser;

pub fn execute(dataset_path: PathBuf) -> Result<()> {
    let dataset = parser::parse_dataset(&dataset_path)?;

    println!("Dataset: {} ({} records)", dataset.name, dataset.records.len());

    let warnings = parser::validate_dataset(&dataset);
    tracing::debug!(
        records = dataset.records.len(),
        warnings = warnings.len(),
        "dataset validated"
    );
    for w in &warnings {
        let prefix = w
            .record_index
            .map(|index| format!("  [record {index}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    print_summary(&dataset);

    if warnings.is_empty() {
        println!("Dataset is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

fn print_summary(dataset: &lexicoach_core::model::Dataset) {
    let questions: std::collections::BTreeSet<&str> = dataset
        .records
        .iter()
        .map(|r| r.question.as_str())
        .collect();

    let mut label_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in dataset.records.iter().filter(|r| r.has_wrong_answer()) {
        *label_counts.entry(record.error_type.as_str()).or_insert(0) += 1;
    }

    let mut table = Table::new();
    table.set_header(vec!["Error type", "Known wrong answers"]);
    for (label, count) in &label_counts {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }

    println!(
        "{} distinct question(s), {} known wrong answer(s)",
        questions.len(),
        label_counts.values().sum::<usize>()
    );
    if label_counts.len() < 2 {
        println!(
            "Note: fewer than two distinct error types; the classifier will degrade to a generic label."
        );
    }
    if !label_counts.is_empty() {
        println!("{table}");
    }
}

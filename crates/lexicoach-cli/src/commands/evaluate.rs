//! The `lexicoach evaluate` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use lexicoach_core::engine::Evaluator;
use lexicoach_core::parser;

pub fn execute(dataset: PathBuf, question: String, answer: String, format: String) -> Result<()> {
    // Unlike the server, the CLI fails loudly on a broken dataset path —
    // a one-shot invocation with an empty store helps nobody.
    let dataset = parser::parse_dataset(&dataset)?;
    tracing::debug!(dataset = %dataset.name, records = dataset.records.len(), "dataset loaded");
    let evaluator = Evaluator::new(dataset.records);

    let result = evaluator.evaluate(&question, &answer);
    tracing::debug!(
        is_correct = result.is_correct,
        error_type = %result.error_type,
        "evaluated answer"
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => {
            if result.is_correct {
                println!("Correct!");
            } else {
                println!("Incorrect ({})", result.error_type);
            }
            println!("{}", result.feedback);
        }
        other => bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

//! The `lexicoach init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("datasets")?;
    let example_path = std::path::Path::new("datasets/example.toml");
    if example_path.exists() {
        println!("datasets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DATASET)?;
        println!("Created datasets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your questions and known mistakes to datasets/example.toml");
    println!("  2. Run: lexicoach validate --dataset datasets/example.toml");
    println!(
        "  3. Run: lexicoach evaluate --dataset datasets/example.toml \
         --question \"How are you?\" --answer \"I am fine\""
    );

    Ok(())
}

const EXAMPLE_DATASET: &str = r#"[dataset]
name = "Example dataset"
description = "A small starter dataset to get going"

[[records]]
question = "How are you?"
correct_answer = "I am fine"

[[records]]
question = "How are you?"
correct_answer = "I am fine"
wrong_answer = "I is fine"
error_type = "verb_agreement_error"
feedback = "Use 'am' with 'I', not 'is'."

[[records]]
question = "Where do you live?"
correct_answer = "I live in London"

[[records]]
question = "Where do you live?"
correct_answer = "I live in London"
wrong_answer = "I living in London"
error_type = "tense_error"
feedback = "Use the simple present: 'I live in London'."
"#;

//! TOML reference-dataset parser.
//!
//! Loads datasets from TOML files and validates them. A dataset file has a
//! `[dataset]` header and one `[[records]]` table per row:
//!
//! ```toml
//! [dataset]
//! name = "English basics"
//!
//! [[records]]
//! question = "How are you?"
//! correct_answer = "I am fine"
//!
//! [[records]]
//! question = "How are you?"
//! correct_answer = "I am fine"
//! wrong_answer = "I is fine"
//! error_type = "verb_agreement_error"
//! feedback = "Use 'am' with 'I', not 'is'."
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Dataset, DatasetRecord, LABEL_NONE};

/// Intermediate TOML structure for parsing dataset files.
#[derive(Debug, Deserialize)]
struct TomlDatasetFile {
    dataset: TomlDatasetHeader,
    #[serde(default)]
    records: Vec<TomlRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlDatasetHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlRecord {
    question: String,
    correct_answer: String,
    #[serde(default)]
    wrong_answer: Option<String>,
    #[serde(default)]
    error_type: Option<String>,
    #[serde(default)]
    feedback: String,
}

/// Parse a single TOML file into a `Dataset`.
pub fn parse_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_dataset_str(&content, path)
}

/// Parse a TOML string into a `Dataset` (useful for testing).
pub fn parse_dataset_str(content: &str, source_path: &Path) -> Result<Dataset> {
    let parsed: TomlDatasetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let records = parsed
        .records
        .into_iter()
        .map(|r| DatasetRecord {
            question: r.question,
            correct_answer: r.correct_answer,
            wrong_answer: r.wrong_answer,
            error_type: r.error_type.unwrap_or_else(|| LABEL_NONE.to_string()),
            feedback: r.feedback,
        })
        .collect();

    Ok(Dataset {
        name: parsed.dataset.name,
        description: parsed.dataset.description,
        records,
    })
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based record index (if applicable).
    pub record_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a dataset for common authoring issues.
///
/// Warnings never block loading; an empty or partially broken dataset is
/// still usable, it just answers fewer questions.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (index, record) in dataset.records.iter().enumerate() {
        if record.question.trim().is_empty() {
            warnings.push(ValidationWarning {
                record_index: Some(index),
                message: "question is empty".into(),
            });
        }
        if record.correct_answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                record_index: Some(index),
                message: "correct_answer is empty".into(),
            });
        }
        if record.has_wrong_answer() {
            if record.error_type == LABEL_NONE {
                warnings.push(ValidationWarning {
                    record_index: Some(index),
                    message: "wrong_answer present but error_type is \"none\"".into(),
                });
            }
            if record.feedback.trim().is_empty() {
                warnings.push(ValidationWarning {
                    record_index: Some(index),
                    message: "wrong_answer present but feedback is empty".into(),
                });
            }
        }
    }

    if dataset.records.is_empty() {
        warnings.push(ValidationWarning {
            record_index: None,
            message: "dataset has no records; every question will be unknown".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[dataset]
name = "Test dataset"
description = "Two questions"

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
wrong_answer = "I living in London"
error_type = "tense_error"
feedback = "Use the simple present: 'I live'."
"#;

    #[test]
    fn parse_valid_toml() {
        let dataset = parse_dataset_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(dataset.name, "Test dataset");
        assert_eq!(dataset.records.len(), 3);
        assert_eq!(dataset.records[0].error_type, LABEL_NONE);
        assert_eq!(dataset.records[1].error_type, "verb_agreement_error");
        assert_eq!(
            dataset.records[2].wrong_answer.as_deref(),
            Some("I living in London")
        );
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[dataset]
name = "Minimal"

[[records]]
question = "Q"
correct_answer = "A"
"#;
        let dataset = parse_dataset_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(dataset.description, "");
        assert!(dataset.records[0].wrong_answer.is_none());
        assert!(dataset.records[0].feedback.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_dataset_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_clean_dataset_has_no_warnings() {
        let dataset = parse_dataset_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_dataset(&dataset).is_empty());
    }

    #[test]
    fn validate_flags_wrong_answer_without_label_or_feedback() {
        let toml = r#"
[dataset]
name = "Sloppy"

[[records]]
question = "Q"
correct_answer = "A"
wrong_answer = "B"
"#;
        let dataset = parse_dataset_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_dataset(&dataset);
        assert!(warnings.iter().any(|w| w.message.contains("error_type")));
        assert!(warnings.iter().any(|w| w.message.contains("feedback")));
    }

    #[test]
    fn validate_flags_empty_dataset() {
        let toml = r#"
[dataset]
name = "Empty"
"#;
        let dataset = parse_dataset_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_dataset(&dataset);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no records"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("dataset.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let dataset = parse_dataset(&file_path).unwrap();
        assert_eq!(dataset.name, "Test dataset");
        assert_eq!(dataset.records.len(), 3);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = parse_dataset(&PathBuf::from("no/such/dataset.toml"));
        assert!(result.is_err());
    }
}

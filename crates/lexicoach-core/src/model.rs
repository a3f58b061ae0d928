//! Core data model types for lexicoach.
//!
//! These are the fundamental types the whole system uses to represent
//! reference dataset rows and evaluation outcomes.

use serde::{Deserialize, Serialize};

/// Reserved error-type label for correct answers.
pub const LABEL_NONE: &str = "none";

/// Reserved error-type label for questions absent from the dataset.
pub const LABEL_QUESTION_NOT_FOUND: &str = "question_not_found";

/// Generic error-type label the classifier falls back to when it could not
/// be trained (fewer than two distinct labels in the dataset).
pub const LABEL_GENERAL: &str = "error_general";

/// Feedback returned for a correct answer.
pub const FEEDBACK_CORRECT: &str = "Excellent work! Your answer is correct.";

/// Feedback returned when the question has no reference record.
pub const FEEDBACK_QUESTION_NOT_FOUND: &str =
    "Sorry, this question is not in our database yet.";

/// Last-resort feedback when no authored message exists for the mistake.
pub const FEEDBACK_GENERIC: &str =
    "Your answer is not correct. Check the structure of your sentence and try again.";

/// One row of the reference dataset.
///
/// A question usually appears in several records: one carrying its correct
/// answer and zero or more carrying previously observed wrong answers with
/// their error type and authored feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Canonical prompt text.
    pub question: String,
    /// The accepted correct answer for this question.
    pub correct_answer: String,
    /// A previously observed incorrect answer, if any.
    #[serde(default)]
    pub wrong_answer: Option<String>,
    /// Label categorizing the mistake in `wrong_answer` ("none" for
    /// correct-only records). Opaque to the engine apart from the
    /// reserved sentinels.
    #[serde(default = "default_error_type")]
    pub error_type: String,
    /// Human-readable explanation tied to this record's mistake.
    #[serde(default)]
    pub feedback: String,
}

fn default_error_type() -> String {
    LABEL_NONE.to_string()
}

impl DatasetRecord {
    /// Returns `true` if this record carries a known wrong answer usable
    /// as a classifier training example.
    pub fn has_wrong_answer(&self) -> bool {
        self.wrong_answer
            .as_deref()
            .is_some_and(|w| !w.trim().is_empty())
    }
}

/// A named collection of reference records, as loaded from one dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Human-readable dataset name.
    pub name: String,
    /// Description of what the dataset covers.
    #[serde(default)]
    pub description: String,
    /// The records, in original file order. Order matters: every tie in
    /// matching and feedback resolution breaks toward the first record.
    #[serde(default)]
    pub records: Vec<DatasetRecord>,
}

/// The engine's answer to one `evaluate(question, answer)` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Whether the answer matched the question's correct answer.
    pub is_correct: bool,
    /// "none" when correct, a dataset or classifier label when incorrect,
    /// or "question_not_found" for unknown questions.
    pub error_type: String,
    /// Always non-empty.
    pub feedback: String,
}

impl EvaluationResult {
    /// Result for an answer matching the correct answer.
    pub fn correct() -> Self {
        Self {
            is_correct: true,
            error_type: LABEL_NONE.to_string(),
            feedback: FEEDBACK_CORRECT.to_string(),
        }
    }

    /// Result for a question absent from the reference dataset.
    pub fn question_not_found() -> Self {
        Self {
            is_correct: false,
            error_type: LABEL_QUESTION_NOT_FOUND.to_string(),
            feedback: FEEDBACK_QUESTION_NOT_FOUND.to_string(),
        }
    }

    /// Result for an incorrect answer with a resolved error type and
    /// feedback message.
    pub fn incorrect(error_type: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            error_type: error_type.into(),
            feedback: feedback.into(),
        }
    }
}

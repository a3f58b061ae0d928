//! Central evaluation orchestrator.
//!
//! Sequences normalization, exact matching, classification, and feedback
//! resolution into one `evaluate(question, answer)` call. Built once at
//! startup; evaluation is a pure read over the frozen store and classifier,
//! so an `Evaluator` can be shared across threads behind an `Arc` without
//! locking.

use std::path::Path;

use crate::classifier::ErrorClassifier;
use crate::error::EngineError;
use crate::matcher::{match_answer, MatchOutcome};
use crate::model::{DatasetRecord, EvaluationResult};
use crate::normalize::normalize;
use crate::resolver::resolve_feedback;
use crate::store::ReferenceStore;

/// The answer-evaluation engine: reference store + fitted classifier.
#[derive(Debug)]
pub struct Evaluator {
    store: ReferenceStore,
    classifier: ErrorClassifier,
}

impl Evaluator {
    /// Build an evaluator from dataset records: constructs the reference
    /// store and fits the error classifier.
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        let classifier = ErrorClassifier::fit(&records);
        let store = ReferenceStore::new(records);
        tracing::info!(
            records = store.len(),
            classifier_degraded = classifier.is_degraded(),
            "evaluator initialized"
        );
        Self { store, classifier }
    }

    /// Build an evaluator from a dataset file. A missing or unparseable
    /// file is not fatal: the evaluator degrades to an empty store, where
    /// every question is unknown.
    pub fn from_dataset_path(path: &Path) -> Self {
        match crate::parser::parse_dataset(path) {
            Ok(dataset) => {
                tracing::info!(
                    dataset = %dataset.name,
                    records = dataset.records.len(),
                    "loaded dataset from {}",
                    path.display()
                );
                Self::new(dataset.records)
            }
            Err(e) => {
                let err = EngineError::DatasetUnavailable(format!("{e:#}"));
                tracing::warn!("{err}; starting with an empty reference store");
                Self::new(Vec::new())
            }
        }
    }

    /// The underlying reference store.
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Returns `true` if the classifier fell back to the constant label.
    pub fn classifier_degraded(&self) -> bool {
        self.classifier.is_degraded()
    }

    /// Evaluate a student's answer to a question.
    ///
    /// Fast path: exact match against the reference store. On a miss with a
    /// known question, the classifier predicts an error type and the
    /// resolver picks the most specific feedback. Deterministic for a fixed
    /// dataset; empty inputs are valid and simply fail to match.
    pub fn evaluate(&self, question: &str, answer: &str) -> EvaluationResult {
        let question = normalize(question);
        let answer = normalize(answer);

        match match_answer(&self.store, &question, &answer) {
            MatchOutcome::QuestionNotFound => EvaluationResult::question_not_found(),
            MatchOutcome::Correct => EvaluationResult::correct(),
            MatchOutcome::KnownWrong(record) => {
                let feedback = if record.feedback.trim().is_empty() {
                    resolve_feedback(&self.store, &question, &answer, &record.error_type)
                } else {
                    record.feedback.clone()
                };
                EvaluationResult::incorrect(record.error_type.clone(), feedback)
            }
            MatchOutcome::NoMatch => {
                let error_type = self.classifier.predict(&question, &answer);
                let feedback = resolve_feedback(&self.store, &question, &answer, &error_type);
                EvaluationResult::incorrect(error_type, feedback)
            }
        }
    }

    /// Like [`Evaluator::evaluate`], but converts any unexpected fault
    /// inside the engine into [`EngineError::Internal`] instead of
    /// unwinding into the caller. Predictable conditions (unknown
    /// question, unmatched answer) are still `Ok` result values.
    pub fn try_evaluate(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<EvaluationResult, EngineError> {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.evaluate(question, answer)
        }))
        .map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic during evaluation".to_string());
            EngineError::Internal(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        FEEDBACK_GENERIC, LABEL_GENERAL, LABEL_NONE, LABEL_QUESTION_NOT_FOUND,
    };

    fn record(
        question: &str,
        correct: &str,
        wrong: Option<&str>,
        error_type: &str,
        feedback: &str,
    ) -> DatasetRecord {
        DatasetRecord {
            question: question.into(),
            correct_answer: correct.into(),
            wrong_answer: wrong.map(Into::into),
            error_type: error_type.into(),
            feedback: feedback.into(),
        }
    }

    fn sample_evaluator() -> Evaluator {
        Evaluator::new(vec![
            record("How are you?", "I am fine", None, LABEL_NONE, ""),
            record(
                "How are you?",
                "I am fine",
                Some("I is fine"),
                "verb_agreement_error",
                "Use 'am' with 'I', not 'is'.",
            ),
            record(
                "Where do you live?",
                "I live in London",
                Some("I living in London"),
                "tense_error",
                "Use the simple present: 'I live'.",
            ),
            record(
                "What did you do yesterday?",
                "I went to school",
                Some("I go to school yesterday"),
                "tense_error",
                "Use the past tense: 'I went'.",
            ),
        ])
    }

    #[test]
    fn exact_correct_path_ignores_case_and_spacing() {
        let evaluator = sample_evaluator();
        let result = evaluator.evaluate("How are you?", "I AM FINE");
        assert!(result.is_correct);
        assert_eq!(result.error_type, LABEL_NONE);

        let result = evaluator.evaluate("  how ARE   you? ", "i am fine");
        assert!(result.is_correct);
    }

    #[test]
    fn unknown_question_path() {
        let evaluator = sample_evaluator();
        let result = evaluator.evaluate("What time is it?", "noon");
        assert!(!result.is_correct);
        assert_eq!(result.error_type, LABEL_QUESTION_NOT_FOUND);
        assert!(!result.feedback.is_empty());
    }

    #[test]
    fn known_wrong_path_uses_the_record_verbatim() {
        let evaluator = sample_evaluator();
        let result = evaluator.evaluate("How are you?", "I is fine");
        assert!(!result.is_correct);
        assert_eq!(result.error_type, "verb_agreement_error");
        assert_eq!(result.feedback, "Use 'am' with 'I', not 'is'.");
    }

    #[test]
    fn classifier_path_returns_dataset_label_and_resolved_feedback() {
        let evaluator = sample_evaluator();
        let result = evaluator.evaluate("Where do you live?", "I goes to London living");
        assert!(!result.is_correct);
        assert!(
            result.error_type == "tense_error" || result.error_type == "verb_agreement_error",
            "unexpected label {}",
            result.error_type
        );
        assert!(!result.feedback.is_empty());
    }

    #[test]
    fn known_wrong_with_blank_feedback_falls_through_to_resolver() {
        let evaluator = Evaluator::new(vec![
            record("Q", "A", Some("B"), "tense_error", ""),
            record("Q2", "A2", Some("B2"), "word_order_error", "Reorder the words."),
        ]);
        let result = evaluator.evaluate("Q", "B");
        assert_eq!(result.error_type, "tense_error");
        // No authored feedback anywhere for tense_error, so the generic
        // message applies.
        assert_eq!(result.feedback, FEEDBACK_GENERIC);
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let evaluator = sample_evaluator();
        let first = evaluator.evaluate("Where do you live?", "London is where I living");
        for _ in 0..10 {
            let again = evaluator.evaluate("Where do you live?", "London is where I living");
            assert_eq!(again, first);
        }
    }

    #[test]
    fn empty_store_never_panics() {
        let evaluator = Evaluator::new(Vec::new());
        for (question, answer) in [("How are you?", "I am fine"), ("", ""), ("x", "y")] {
            let result = evaluator.evaluate(question, answer);
            assert!(!result.is_correct);
            assert_eq!(result.error_type, LABEL_QUESTION_NOT_FOUND);
        }
    }

    #[test]
    fn single_label_dataset_degrades_to_general() {
        let evaluator = Evaluator::new(vec![record(
            "Q",
            "A",
            Some("B"),
            "tense_error",
            "Watch the tense.",
        )]);
        assert!(evaluator.classifier_degraded());
        let result = evaluator.evaluate("Q", "C");
        assert_eq!(result.error_type, LABEL_GENERAL);
        assert_eq!(result.feedback, FEEDBACK_GENERIC);
    }

    #[test]
    fn try_evaluate_agrees_with_evaluate_on_every_path() {
        let evaluator = sample_evaluator();
        for (question, answer) in [
            ("How are you?", "I am fine"),
            ("How are you?", "I is fine"),
            ("How are you?", "something else entirely"),
            ("What time is it?", "noon"),
            ("", ""),
        ] {
            let direct = evaluator.evaluate(question, answer);
            let checked = evaluator.try_evaluate(question, answer).unwrap();
            assert_eq!(checked, direct);
        }
    }

    #[test]
    fn missing_dataset_file_degrades_to_empty_store() {
        let evaluator = Evaluator::from_dataset_path(Path::new("no/such/dataset.toml"));
        assert!(evaluator.store().is_empty());
        let result = evaluator.evaluate("How are you?", "I am fine");
        assert_eq!(result.error_type, LABEL_QUESTION_NOT_FOUND);
    }

    #[test]
    fn loads_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.toml");
        std::fs::write(
            &path,
            r#"
[dataset]
name = "Tiny"

[[records]]
question = "How are you?"
correct_answer = "I am fine"
"#,
        )
        .unwrap();

        let evaluator = Evaluator::from_dataset_path(&path);
        assert_eq!(evaluator.store().len(), 1);
        assert!(evaluator.evaluate("How are you?", "i am fine").is_correct);
    }
}

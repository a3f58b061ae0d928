//! Exact matching of a normalized answer against the reference store.
//!
//! Produces a tagged outcome instead of sentinel strings, so "question is
//! unknown", "matched the correct answer", and "matched nothing" are
//! distinguishable by type.

use crate::model::DatasetRecord;
use crate::store::ReferenceStore;

/// Outcome of exact matching one (question, answer) pair.
#[derive(Debug)]
pub enum MatchOutcome<'a> {
    /// No record has this question.
    QuestionNotFound,
    /// The answer equals a record's correct answer.
    Correct,
    /// The answer equals a record's known wrong answer; the record carries
    /// the error type and authored feedback.
    KnownWrong(&'a DatasetRecord),
    /// The question exists but the answer matches neither a correct nor a
    /// known wrong answer; the classifier path takes over.
    NoMatch,
}

/// Match a normalized answer against the records for a normalized question.
///
/// Candidates are visited in dataset order; within each record the correct
/// answer is checked before the known wrong answer, mirroring the order the
/// reference data was authored in. The first hit wins.
pub fn match_answer<'a>(
    store: &'a ReferenceStore,
    normalized_question: &str,
    normalized_answer: &str,
) -> MatchOutcome<'a> {
    let candidates = store.candidate_indices(normalized_question);
    if candidates.is_empty() {
        return MatchOutcome::QuestionNotFound;
    }

    for &index in candidates {
        if store.is_correct_answer(index, normalized_answer) {
            return MatchOutcome::Correct;
        }
        if store.is_known_wrong_answer(index, normalized_answer) {
            return MatchOutcome::KnownWrong(store.record(index));
        }
    }

    MatchOutcome::NoMatch
}

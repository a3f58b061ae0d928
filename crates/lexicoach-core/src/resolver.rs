//! Feedback resolution for classified mistakes.
//!
//! Precision over generality: feedback authored for this exact
//! (question, wrong answer) pair beats feedback authored for the mistake
//! category, which beats the fixed generic message.

use crate::model::FEEDBACK_GENERIC;
use crate::store::ReferenceStore;

/// Pick the most specific available feedback for an incorrect answer.
///
/// Resolution order:
/// 1. A record matching (question, wrong answer) exactly.
/// 2. The first record anywhere in the dataset sharing `error_type`.
/// 3. The fixed generic structural-error message.
///
/// Records whose feedback field is blank are skipped at each step, so the
/// returned string is always non-empty.
pub fn resolve_feedback(
    store: &ReferenceStore,
    normalized_question: &str,
    normalized_answer: &str,
    error_type: &str,
) -> String {
    if let Some(record) = store.find_known_wrong(normalized_question, normalized_answer) {
        if !record.feedback.trim().is_empty() {
            return record.feedback.clone();
        }
    }

    if let Some(record) = store
        .find_by_error_type(error_type)
        .find(|r| !r.feedback.trim().is_empty())
    {
        return record.feedback.clone();
    }

    FEEDBACK_GENERIC.to_string()
}

//! In-memory view of the reference dataset.
//!
//! Built once at startup and immutable afterward. Construction normalizes
//! every comparable field and precomputes two indices — normalized question
//! to candidate records, and error type to records — so request-time
//! lookups never scan the whole table. Candidate lists preserve original
//! dataset order; every tie breaks toward the first record.

use std::collections::HashMap;

use crate::model::DatasetRecord;
use crate::normalize::normalize;

/// Normalized projection of one record, computed at construction.
#[derive(Debug)]
struct NormalizedRecord {
    question: String,
    correct_answer: String,
    wrong_answer: Option<String>,
}

/// Read-only store over the reference dataset.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    records: Vec<DatasetRecord>,
    normalized: Vec<NormalizedRecord>,
    by_question: HashMap<String, Vec<usize>>,
    by_error_type: HashMap<String, Vec<usize>>,
}

impl ReferenceStore {
    /// Build a store from dataset records. An empty input yields a valid,
    /// empty store in which every question is unknown.
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        let normalized: Vec<NormalizedRecord> = records
            .iter()
            .map(|r| NormalizedRecord {
                question: normalize(&r.question),
                correct_answer: normalize(&r.correct_answer),
                wrong_answer: r.wrong_answer.as_deref().map(normalize),
            })
            .collect();

        let mut by_question: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_error_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, norm) in normalized.iter().enumerate() {
            by_question
                .entry(norm.question.clone())
                .or_default()
                .push(index);
            by_error_type
                .entry(records[index].error_type.clone())
                .or_default()
                .push(index);
        }

        Self {
            records,
            normalized,
            by_question,
            by_error_type,
        }
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    /// Returns `true` if any record has this normalized question.
    pub fn has_question(&self, normalized_question: &str) -> bool {
        self.by_question.contains_key(normalized_question)
    }

    /// Records sharing this normalized question, in dataset order.
    pub fn find_by_question<'a>(
        &'a self,
        normalized_question: &str,
    ) -> impl Iterator<Item = &'a DatasetRecord> + 'a {
        self.candidates(normalized_question)
            .iter()
            .map(move |&index| &self.records[index])
    }

    /// First record (in dataset order) whose question matches and whose
    /// correct answer OR known wrong answer equals the given normalized
    /// answer.
    pub fn find_exact(
        &self,
        normalized_question: &str,
        normalized_answer: &str,
    ) -> Option<&DatasetRecord> {
        self.candidates(normalized_question)
            .iter()
            .find(|&&index| {
                let norm = &self.normalized[index];
                norm.correct_answer == normalized_answer
                    || norm.wrong_answer.as_deref() == Some(normalized_answer)
            })
            .map(|&index| &self.records[index])
    }

    /// First record whose question matches and whose known wrong answer
    /// equals the given normalized answer.
    pub fn find_known_wrong(
        &self,
        normalized_question: &str,
        normalized_answer: &str,
    ) -> Option<&DatasetRecord> {
        self.candidates(normalized_question)
            .iter()
            .find(|&&index| {
                self.normalized[index].wrong_answer.as_deref() == Some(normalized_answer)
            })
            .map(|&index| &self.records[index])
    }

    /// Records carrying this error type, in dataset order.
    pub fn find_by_error_type<'a>(
        &'a self,
        error_type: &str,
    ) -> impl Iterator<Item = &'a DatasetRecord> + 'a {
        self.by_error_type
            .get(error_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.records[index])
    }

    /// Record indices for a normalized question, in dataset order.
    fn candidates(&self, normalized_question: &str) -> &[usize] {
        self.by_question
            .get(normalized_question)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the given normalized answer equals the record's normalized
    /// correct answer.
    pub(crate) fn is_correct_answer(&self, index: usize, normalized_answer: &str) -> bool {
        self.normalized[index].correct_answer == normalized_answer
    }

    /// Whether the given normalized answer equals the record's normalized
    /// known wrong answer.
    pub(crate) fn is_known_wrong_answer(&self, index: usize, normalized_answer: &str) -> bool {
        self.normalized[index].wrong_answer.as_deref() == Some(normalized_answer)
    }

    /// Indices of records sharing this normalized question.
    pub(crate) fn candidate_indices(&self, normalized_question: &str) -> &[usize] {
        self.candidates(normalized_question)
    }

    /// Record by index. Panics on out-of-range indices, which cannot be
    /// produced by the candidate lists.
    pub(crate) fn record(&self, index: usize) -> &DatasetRecord {
        &self.records[index]
    }
}

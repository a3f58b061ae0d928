//! Error-type classifier for answers with no exact match.
//!
//! Trained once at startup on the dataset's known wrong answers: each
//! training document is `normalized_question + " | " + normalized_wrong_answer`
//! labeled with the record's error type. Features are TF-IDF weighted
//! unigram and bigram counts; the model is a one-vs-rest averaged
//! perceptron with a hinge margin. Everything is deterministic — the
//! vocabulary and label set are built in sorted order, training iterates
//! samples in dataset order, and no randomness is involved — so identical
//! datasets always produce identical predictions.

use std::collections::{HashMap, HashSet};

use crate::model::{DatasetRecord, LABEL_GENERAL};
use crate::normalize::normalize;

const EPOCHS: usize = 20;
const LEARNING_RATE: f64 = 0.1;
const MARGIN: f64 = 0.1;

/// Build the classifier document for a (question, answer) pair. The same
/// concatenation is used for training rows and incoming queries.
pub fn classifier_document(normalized_question: &str, normalized_answer: &str) -> String {
    format!("{normalized_question} | {normalized_answer}")
}

/// Split a normalized document into unigram and bigram terms.
fn tokenize(document: &str) -> Vec<String> {
    let words: Vec<&str> = document.split_whitespace().collect();
    let mut terms: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// TF-IDF vectorizer over unigram and bigram terms.
#[derive(Debug)]
pub struct TfIdfVectorizer {
    /// Term -> feature index, assigned in sorted term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit the vectorizer on training documents.
    pub fn fit(documents: &[String]) -> Self {
        let n_documents = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_terms: HashSet<String> = tokenize(doc).into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        // Sorted term order keeps feature indices stable across runs.
        let mut terms: Vec<&String> = document_frequency.keys().collect();
        terms.sort();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency[term];
            vocabulary.insert(term.clone(), index);
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    /// Transform a document into an L2-normalized TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let terms = tokenize(document);
        let mut features = vec![0.0; self.vocabulary.len()];

        for term in &terms {
            if let Some(&index) = self.vocabulary.get(term) {
                features[index] += 1.0;
            }
        }

        let term_count = terms.len() as f64;
        if term_count > 0.0 {
            for value in &mut features {
                *value /= term_count;
            }
        }

        for (index, value) in features.iter_mut().enumerate() {
            *value *= self.idf[index];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    /// Number of features in the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// One-vs-rest averaged perceptron over dense feature vectors.
#[derive(Debug)]
pub struct LinearClassifier {
    /// Per-class weight vectors (averaged over all training steps).
    weights: Vec<Vec<f64>>,
    /// Per-class bias terms.
    bias: Vec<f64>,
}

impl LinearClassifier {
    /// Train on feature vectors and class indices in the given order.
    fn fit(features: &[Vec<f64>], classes: &[usize], n_classes: usize, n_features: usize) -> Self {
        let mut weights = vec![vec![0.0; n_features]; n_classes];
        let mut bias = vec![0.0; n_classes];
        // Running sums for weight averaging; averaging smooths the final
        // model without changing determinism.
        let mut weight_sums = vec![vec![0.0; n_features]; n_classes];
        let mut bias_sums = vec![0.0; n_classes];
        let mut steps = 0.0;

        for _ in 0..EPOCHS {
            for (x, &class) in features.iter().zip(classes) {
                for target in 0..n_classes {
                    let y = if target == class { 1.0 } else { -1.0 };
                    let score: f64 = weights[target]
                        .iter()
                        .zip(x)
                        .map(|(w, v)| w * v)
                        .sum::<f64>()
                        + bias[target];
                    if y * score <= MARGIN {
                        for (w, v) in weights[target].iter_mut().zip(x) {
                            *w += LEARNING_RATE * y * v;
                        }
                        bias[target] += LEARNING_RATE * y;
                    }
                }
                steps += 1.0;
                for target in 0..n_classes {
                    for (sum, w) in weight_sums[target].iter_mut().zip(&weights[target]) {
                        *sum += w;
                    }
                    bias_sums[target] += bias[target];
                }
            }
        }

        if steps > 0.0 {
            for target in 0..n_classes {
                for sum in &mut weight_sums[target] {
                    *sum /= steps;
                }
                bias_sums[target] /= steps;
            }
        }

        Self {
            weights: weight_sums,
            bias: bias_sums,
        }
    }

    /// Predict the class index with the highest score. Ties break toward
    /// the lowest index, which is the lexicographically first label.
    fn predict(&self, x: &[f64]) -> usize {
        let mut best_class = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, (weights, bias)) in self.weights.iter().zip(&self.bias).enumerate() {
            let score: f64 =
                weights.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + bias;
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }
        best_class
    }
}

/// The error-type classifier, or its degraded stand-in when the dataset
/// cannot support training.
#[derive(Debug)]
pub enum ErrorClassifier {
    /// Fitted vectorizer + linear model with the sorted label set.
    Trained {
        vectorizer: TfIdfVectorizer,
        model: LinearClassifier,
        labels: Vec<String>,
    },
    /// Fewer than two distinct error labels in the training data; every
    /// prediction is the constant general label.
    Degraded,
}

impl ErrorClassifier {
    /// Fit from dataset records. Only records with a known wrong answer
    /// contribute training rows. Falls back to [`ErrorClassifier::Degraded`]
    /// rather than failing when the data is untrainable.
    pub fn fit(records: &[DatasetRecord]) -> Self {
        let mut documents = Vec::new();
        let mut row_labels = Vec::new();
        for record in records.iter().filter(|r| r.has_wrong_answer()) {
            let question = normalize(&record.question);
            let wrong = normalize(record.wrong_answer.as_deref().unwrap_or_default());
            documents.push(classifier_document(&question, &wrong));
            row_labels.push(record.error_type.clone());
        }

        let mut labels: Vec<String> = row_labels
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        labels.sort();

        if labels.len() < 2 {
            tracing::warn!(
                distinct_labels = labels.len(),
                "not enough distinct error labels to train; classifier degraded to '{LABEL_GENERAL}'"
            );
            return Self::Degraded;
        }

        let vectorizer = TfIdfVectorizer::fit(&documents);
        let features: Vec<Vec<f64>> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let classes: Vec<usize> = row_labels
            .iter()
            .map(|label| labels.iter().position(|l| l == label).unwrap_or(0))
            .collect();
        let n_features = vectorizer.vocabulary_size();
        let model = LinearClassifier::fit(&features, &classes, labels.len(), n_features);

        tracing::debug!(
            rows = documents.len(),
            labels = labels.len(),
            features = n_features,
            "error classifier trained"
        );

        Self::Trained {
            vectorizer,
            model,
            labels,
        }
    }

    /// Predict an error-type label for a normalized (question, answer)
    /// pair. Infallible and deterministic.
    pub fn predict(&self, normalized_question: &str, normalized_answer: &str) -> String {
        match self {
            Self::Trained {
                vectorizer,
                model,
                labels,
            } => {
                let document = classifier_document(normalized_question, normalized_answer);
                let features = vectorizer.transform(&document);
                labels[model.predict(&features)].clone()
            }
            Self::Degraded => LABEL_GENERAL.to_string(),
        }
    }

    /// Returns `true` if the classifier fell back to the constant label.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LABEL_NONE;

    fn record(question: &str, wrong: Option<&str>, error_type: &str) -> DatasetRecord {
        DatasetRecord {
            question: question.into(),
            correct_answer: "placeholder".into(),
            wrong_answer: wrong.map(Into::into),
            error_type: error_type.into(),
            feedback: String::new(),
        }
    }

    fn training_records() -> Vec<DatasetRecord> {
        vec![
            record("Where do you live?", Some("I living in London"), "tense_error"),
            record("What did you do?", Some("I go yesterday"), "tense_error"),
            record("How are you?", Some("Fine am I"), "word_order_error"),
            record("What is this?", Some("Book a is this"), "word_order_error"),
        ]
    }

    #[test]
    fn tokenize_produces_unigrams_and_bigrams() {
        let terms = tokenize("i am fine");
        assert!(terms.contains(&"i".to_string()));
        assert!(terms.contains(&"am fine".to_string()));
        assert_eq!(terms.len(), 5);
    }

    #[test]
    fn vectorizer_transform_is_l2_normalized() {
        let vectorizer = TfIdfVectorizer::fit(&["i am fine".into(), "i is fine".into()]);
        let features = vectorizer.transform("i am fine");
        let norm: f64 = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vectorizer_ignores_unseen_terms() {
        let vectorizer = TfIdfVectorizer::fit(&["i am fine".into()]);
        let features = vectorizer.transform("completely different words");
        assert!(features.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn classifier_recovers_training_labels() {
        let classifier = ErrorClassifier::fit(&training_records());
        assert!(!classifier.is_degraded());
        assert_eq!(
            classifier.predict("where do you live?", "i living in london"),
            "tense_error"
        );
        assert_eq!(
            classifier.predict("how are you?", "fine am i"),
            "word_order_error"
        );
    }

    #[test]
    fn prediction_stays_inside_the_label_set() {
        let classifier = ErrorClassifier::fit(&training_records());
        let label = classifier.predict("how are you?", "i is fine yesterday go");
        assert!(label == "tense_error" || label == "word_order_error");
    }

    #[test]
    fn deterministic_across_fits() {
        let a = ErrorClassifier::fit(&training_records());
        let b = ErrorClassifier::fit(&training_records());
        for (question, answer) in [
            ("where do you live?", "london i live"),
            ("how are you?", "i fine"),
            ("what did you do?", "go i yesterday"),
        ] {
            assert_eq!(a.predict(question, answer), b.predict(question, answer));
        }
    }

    #[test]
    fn degrades_below_two_distinct_labels() {
        let single = vec![record("Q", Some("B"), "tense_error")];
        let classifier = ErrorClassifier::fit(&single);
        assert!(classifier.is_degraded());
        assert_eq!(classifier.predict("q", "anything"), LABEL_GENERAL);
    }

    #[test]
    fn degrades_when_no_wrong_answers_exist() {
        let correct_only = vec![
            record("Q1", None, LABEL_NONE),
            record("Q2", None, LABEL_NONE),
        ];
        let classifier = ErrorClassifier::fit(&correct_only);
        assert!(classifier.is_degraded());
    }
}

//! Extractive summarization by latent-semantic salience.
//!
//! Sentences are rows of a term-frequency matrix; each is scored by its projection
//! onto the dominant right singular vector of that matrix, the top share is kept
//! and emitted in source order.

use std::collections::HashMap;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::{config::ExtractiveConfig, error::CapabilityError};

const POWER_ITERATIONS: usize = 100;
const CONVERGENCE_EPSILON: f64 = 1e-10;

static TERM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "else", "ever", "every", "few", "for", "from", "further", "get", "got", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "least", "less", "like", "may",
    "me", "might", "more", "most", "much", "must", "my", "myself", "neither", "no", "nor", "not",
    "now", "of", "off", "often", "on", "once", "one", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "per", "please", "rather", "really", "same", "shall", "she",
    "should", "since", "so", "some", "still", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "though", "through",
    "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "was", "we", "well", "were",
    "what", "whatever", "when", "where", "whether", "which", "while", "who", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

static STOP_WORD_SET: LazyLock<std::collections::HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

#[derive(Debug, Clone, Default)]
pub struct ExtractiveSummarizer {
    config: ExtractiveConfig,
}

impl ExtractiveSummarizer {
    pub fn new(config: ExtractiveConfig) -> Self {
        Self { config }
    }

    /// Summarizes `sentences`, falling back to the leading sentences when they
    /// cannot be ranked. Never fails.
    pub fn summarize<S: AsRef<str>>(&self, sentences: &[S]) -> String {
        match sentences {
            [] => String::new(),
            [only] => self.truncate_single(only.as_ref()),
            _ => match self.select(sentences) {
                Ok(indices) => indices.iter().map(|&i| sentences[i].as_ref()).join(" "),
                Err(e) => {
                    tracing::warn!(error = %e, "Sentence ranking failed, keeping leading sentences");
                    sentences
                        .iter()
                        .take(self.config.fallback_sentences)
                        .map(|s| s.as_ref())
                        .join(" ")
                }
            },
        }
    }

    /// Indices of the selected sentences, in source order.
    pub fn select<S: AsRef<str>>(&self, sentences: &[S]) -> Result<Vec<usize>, CapabilityError> {
        let scores = self.salience_scores(sentences)?;
        let keep = self.sentences_to_keep(sentences.len());

        let selected = scores
            .iter()
            .enumerate()
            // ties keep the earlier sentence
            .sorted_by(|(ia, a), (ib, b)| b.total_cmp(a).then(ia.cmp(ib)))
            .take(keep)
            .map(|(idx, _)| idx)
            .sorted()
            .collect();

        Ok(selected)
    }

    /// `max(1, min(cap, round(p * n)))`
    pub fn sentences_to_keep(&self, sentence_count: usize) -> usize {
        let proportional = (self.config.proportion * sentence_count as f64).round() as usize;
        proportional.min(self.config.max_sentences).max(1)
    }

    /// One score per sentence: its projection onto the dominant singular direction
    /// of the sentence-by-term matrix.
    pub fn salience_scores<S: AsRef<str>>(
        &self,
        sentences: &[S],
    ) -> Result<Vec<f64>, CapabilityError> {
        let matrix = self.term_matrix(sentences)?;
        let direction = dominant_direction(&matrix)?;

        Ok(matrix
            .iter()
            .map(|row| dot(row, &direction))
            .collect())
    }

    fn term_matrix<S: AsRef<str>>(&self, sentences: &[S]) -> Result<Vec<Vec<f64>>, CapabilityError> {
        let tokenized = sentences
            .iter()
            .map(|s| terms(s.as_ref()))
            .collect::<Vec<_>>();

        let mut totals: HashMap<&str, usize> = HashMap::new();
        for term in tokenized.iter().flatten() {
            *totals.entry(term.as_str()).or_default() += 1;
        }
        if totals.is_empty() {
            return Err(CapabilityError::Degenerate("no extractable terms"));
        }

        // most frequent terms win the vocabulary; ties by term for determinism
        let vocabulary = totals
            .into_iter()
            .sorted_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then(ta.cmp(tb)))
            .take(self.config.max_vocabulary)
            .enumerate()
            .map(|(column, (term, _))| (term, column))
            .collect::<HashMap<_, _>>();

        let matrix = tokenized
            .iter()
            .map(|sentence_terms| {
                let mut row = vec![0.0; vocabulary.len()];
                for term in sentence_terms {
                    if let Some(&column) = vocabulary.get(term.as_str()) {
                        row[column] += 1.0;
                    }
                }
                row
            })
            .collect();

        Ok(matrix)
    }

    fn truncate_single(&self, sentence: &str) -> String {
        let limit = self.config.single_sentence_chars;
        if sentence.chars().count() <= limit {
            return sentence.to_string();
        }
        let prefix = sentence.chars().take(limit).collect::<String>();
        format!("{}...", prefix.trim_end())
    }
}

fn terms(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !STOP_WORD_SET.contains(term))
        .map(String::from)
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Dominant right singular vector of `matrix` by power iteration on `XᵀX`.
///
/// The matrix is non-negative and the start vector is uniform, so the iterate
/// stays non-negative and the sign is fixed.
fn dominant_direction(matrix: &[Vec<f64>]) -> Result<Vec<f64>, CapabilityError> {
    let columns = matrix.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(CapabilityError::Degenerate("empty term matrix"));
    }

    let mut v = vec![1.0 / (columns as f64).sqrt(); columns];
    for _ in 0..POWER_ITERATIONS {
        let xv = matrix.iter().map(|row| dot(row, &v)).collect::<Vec<_>>();

        let mut next = vec![0.0; columns];
        for (row, weight) in matrix.iter().zip(&xv) {
            for (acc, value) in next.iter_mut().zip(row) {
                *acc += value * weight;
            }
        }

        let length = norm(&next);
        if length == 0.0 || !length.is_finite() {
            return Err(CapabilityError::Degenerate("zero singular value"));
        }
        next.iter_mut().for_each(|x| *x /= length);

        let delta = next
            .iter()
            .zip(&v)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        v = next;
        if delta < CONVERGENCE_EPSILON {
            break;
        }
    }

    Ok(v)
}

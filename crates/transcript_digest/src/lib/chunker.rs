//! # Token-aware chunking
//!
//! Greedy packing of sentences into chunks that fit one summarization call.
//! Boundaries fall between sentences; a sentence that alone exceeds the budget is
//! packed the same way one word at a time.

use crate::tokens::{estimate_or_count, TokenEstimator};

/// A contiguous run of sentences (or, for an oversized sentence, words).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    /// Sum of the estimates of the units packed into this chunk.
    pub token_estimate: usize,
}

pub struct TokenAwareChunker<'a, E: TokenEstimator + ?Sized> {
    estimator: &'a E,
    budget: usize,
}

impl<'a, E: TokenEstimator + ?Sized> TokenAwareChunker<'a, E> {
    pub fn new(estimator: &'a E, budget: usize) -> Self {
        Self { estimator, budget }
    }

    #[tracing::instrument(skip_all, fields(sentences = sentences.len(), budget = self.budget))]
    pub fn chunk<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<Chunk> {
        let mut packer = Packer::new(self.budget);

        for sentence in sentences {
            let sentence = sentence.as_ref().trim();
            if sentence.is_empty() {
                continue;
            }

            let tokens = estimate_or_count(self.estimator, sentence);
            if tokens > self.budget {
                tracing::debug!(tokens, "Sentence exceeds budget, splitting by words");
                packer.flush();
                for word in sentence.split_whitespace() {
                    packer.push(word, estimate_or_count(self.estimator, word));
                }
                packer.flush();
            } else {
                packer.push(sentence, tokens);
            }
        }

        let chunks = packer.finish();
        tracing::debug!(chunks = chunks.len(), "Chunked transcript");
        chunks
    }
}

/// Running chunk state shared by the sentence and word passes.
struct Packer {
    budget: usize,
    units: Vec<String>,
    tokens: usize,
    chunks: Vec<Chunk>,
}

impl Packer {
    fn new(budget: usize) -> Self {
        Self {
            budget,
            units: Vec::new(),
            tokens: 0,
            chunks: Vec::new(),
        }
    }

    /// Closes the running chunk first if `unit` would push it over budget.
    /// A unit larger than the budget on its own still becomes a chunk.
    fn push(&mut self, unit: &str, tokens: usize) {
        if !self.units.is_empty() && self.tokens + tokens > self.budget {
            self.flush();
        }
        self.units.push(unit.to_string());
        self.tokens += tokens;
    }

    fn flush(&mut self) {
        if self.units.is_empty() {
            return;
        }
        self.chunks.push(Chunk {
            text: self.units.join(" "),
            token_estimate: self.tokens,
        });
        self.units.clear();
        self.tokens = 0;
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks.retain(|c| !c.text.is_empty());
        self.chunks
    }
}

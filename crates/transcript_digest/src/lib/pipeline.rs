pub mod builder;
pub mod strategy;

use std::hash::{DefaultHasher, Hash, Hasher};

use itertools::Itertools;
use summary_cache::{CacheKey, SummaryCache, SummaryResult};

use crate::{
    chunker::TokenAwareChunker,
    config::PipelineConfig,
    error::CapabilityError,
    llm::{abstractive, extractive::ExtractiveSummarizer},
    text::{
        self,
        language::LanguageGate,
        safety::{SafetyFilter, SafetyVerdict, SAFETY_ADVISORY},
        segmenter::{segment_sentences, SentenceSegmenter},
    },
    tokens::{estimate_or_count, TokenEstimator},
    Summarizer,
};

use strategy::{truncate_with_ellipsis, Strategy};

const LANGUAGE_ADVISORY: &str = "Transcript does not appear to be in English, so no summary was generated.";
const FAILURE_MESSAGE: &str = "Unable to produce a summary for this transcript.";

/// The adaptive summarization pipeline: normalize, gate, then either one direct
/// call or chunk, summarize per chunk and reduce.
///
/// Holds no per-request state, so one instance can serve concurrent requests; the
/// only shared mutable state is the injected cache.
pub struct SummaryPipeline<S, E, G, C>
where
    S: Summarizer + Send + Sync,
    E: TokenEstimator + Send + Sync,
    G: SentenceSegmenter + Send + Sync,
    C: SummaryCache + Send + Sync,
{
    config: PipelineConfig,
    safety: SafetyFilter,
    language: Option<LanguageGate>,
    extractive: ExtractiveSummarizer,
    summarizer: S,
    estimator: E,
    segmenter: G,
    cache: C,
}

/// Derives a content identity from the transcript itself, for callers that have no
/// external id for it.
pub fn content_fingerprint(transcript: &str) -> String {
    let mut hasher = DefaultHasher::new();
    transcript.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

impl<S, E, G, C> SummaryPipeline<S, E, G, C>
where
    S: Summarizer + Send + Sync,
    E: TokenEstimator + Send + Sync,
    G: SentenceSegmenter + Send + Sync,
    C: SummaryCache + Send + Sync,
{
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Summarizes `transcript` to roughly `max_length` units, memoized under
    /// (`content_id`, `max_length`). Only allowed results are cached.
    #[tracing::instrument(skip(self, transcript), fields(chars = transcript.len()))]
    pub async fn summarize(
        &self,
        content_id: &str,
        transcript: &str,
        max_length: usize,
    ) -> SummaryResult {
        let key = CacheKey::new(content_id, max_length);
        if let Some(cached) = self.cache.get(&key) {
            tracing::info!(%key, "Returning cached summary");
            return cached;
        }

        let result = self.run(transcript, max_length).await;
        tracing::info!(%key, status = %result.status, "Summarization finished");

        if result.is_allowed() {
            self.cache.put(key, result.clone());
        }
        result
    }

    /// [`Self::summarize`] keyed by a fingerprint of the transcript.
    pub async fn summarize_transcript(&self, transcript: &str, max_length: usize) -> SummaryResult {
        let content_id = content_fingerprint(transcript);
        self.summarize(&content_id, transcript, max_length).await
    }

    /// Extractive summary of the whole transcript, without gates or the generative
    /// summarizer.
    pub fn extract(&self, transcript: &str) -> String {
        let normalized = text::normalize(transcript);
        let sentences = segment_sentences(&self.segmenter, &normalized);
        self.extractive.summarize(&sentences)
    }

    /// Safety verdict for the transcript, annotations included.
    pub fn check(&self, transcript: &str) -> SafetyVerdict {
        self.safety.check(transcript)
    }

    async fn run(&self, transcript: &str, max_length: usize) -> SummaryResult {
        if max_length == 0 {
            return SummaryResult::blocked("max_length must be greater than zero.");
        }

        let normalized = text::normalize(transcript);
        let words = text::word_count(&normalized);
        if words < self.config.min_words {
            tracing::info!(words, min_words = self.config.min_words, "Transcript too short");
            return SummaryResult::blocked(format!(
                "Transcript too short to summarize: {words} words, at least {} required.",
                self.config.min_words
            ));
        }

        // raw text: `[explosion]` is stripped by normalization but still counts
        if let SafetyVerdict::Unsafe { keyword } = self.safety.check(transcript) {
            tracing::warn!(%keyword, "Transcript blocked by safety filter");
            return SummaryResult::blocked(SAFETY_ADVISORY);
        }

        if let Some(gate) = &self.language {
            if !gate.is_english(&normalized) {
                tracing::info!("Transcript blocked by language gate");
                return SummaryResult::blocked(LANGUAGE_ADVISORY);
            }
        }

        let tokens = self.tokens(&normalized);
        let summary = if tokens <= self.config.single_call_budget {
            tracing::info!(tokens, "Summarizing transcript in a single call");
            self.apply(Strategy::DIRECT, &normalized, max_length, None).await
        } else {
            tracing::info!(tokens, "Transcript exceeds single-call budget, chunking");
            self.reduce(&normalized, max_length).await
        };

        match summary.map(|s| s.trim().to_string()) {
            Some(summary) if !summary.is_empty() => SummaryResult::allowed(summary),
            _ => {
                tracing::error!("Every summarization strategy failed");
                SummaryResult::error(FAILURE_MESSAGE)
            }
        }
    }

    /// Chunk, summarize each chunk, concatenate, and compress once more if the
    /// concatenation is still over the reduce threshold.
    async fn reduce(&self, normalized: &str, max_length: usize) -> Option<String> {
        let sentences = segment_sentences(&self.segmenter, normalized);
        let chunks = TokenAwareChunker::new(&self.estimator, self.config.chunk_budget).chunk(&sentences);
        if chunks.is_empty() {
            return None;
        }

        let mut partials = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            let target = self.chunk_target_length(max_length, chunks.len(), chunk.token_estimate);
            let strategies = if chunk.token_estimate > self.config.single_call_budget {
                tracing::warn!(idx, tokens = chunk.token_estimate, "Chunk still over single-call budget");
                Strategy::OVERSIZED_CHUNK
            } else {
                Strategy::PER_CHUNK
            };

            match self.apply(strategies, &chunk.text, target, None).await {
                Some(partial) => partials.push(partial),
                None => tracing::error!(idx, "Failed to summarize chunk, skipping"),
            }
        }

        let combined = partials.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).join(" ");
        if combined.is_empty() {
            return None;
        }

        let combined_tokens = self.tokens(&combined);
        tracing::info!(
            chunks = chunks.len(),
            combined_tokens,
            "Concatenated chunk summaries"
        );
        if combined_tokens <= self.config.reduce_threshold {
            return Some(combined);
        }

        let limit = max_length.max(self.config.reduce_threshold);
        self.apply(Strategy::REDUCE, &combined, max_length, Some(limit))
            .await
    }

    /// `max(floor, min(max_length / chunks, chunk_tokens / 3))`.
    ///
    /// Heuristic split of the length budget: neither bound dominates in general.
    pub fn chunk_target_length(&self, max_length: usize, chunks: usize, chunk_tokens: usize) -> usize {
        let share = max_length / chunks.max(1);
        share.min(chunk_tokens / 3).max(self.config.min_target_length)
    }

    /// Walks `strategies` in order and returns the first usable output. When
    /// `limit` is set, outputs estimated above it are rejected.
    async fn apply(
        &self,
        strategies: &[Strategy],
        text: &str,
        target_length: usize,
        limit: Option<usize>,
    ) -> Option<String> {
        for &strategy in strategies {
            let attempt = match strategy {
                Strategy::Abstractive => {
                    abstractive::generate(
                        &self.summarizer,
                        text,
                        target_length,
                        self.config.abstractive_min_length,
                    )
                    .await
                }
                Strategy::Extractive => self.extract_normalized(text),
                Strategy::Truncate => Ok(truncate_with_ellipsis(text, self.config.truncate_chars)),
            };

            let output = attempt.and_then(|output| match limit {
                Some(limit) if strategy != Strategy::Truncate && self.tokens(&output) > limit => {
                    Err(CapabilityError::Degenerate("output exceeds length limit"))
                }
                _ => Ok(output),
            });

            match output {
                Ok(output) => {
                    tracing::debug!(?strategy, "Strategy succeeded");
                    return Some(output);
                }
                Err(e) => tracing::warn!(?strategy, error = %e, "Strategy failed, trying next"),
            }
        }
        None
    }

    fn extract_normalized(&self, text: &str) -> Result<String, CapabilityError> {
        let sentences = segment_sentences(&self.segmenter, text);
        let summary = self.extractive.summarize(&sentences);
        if summary.trim().is_empty() {
            return Err(CapabilityError::EmptyOutput);
        }
        Ok(summary)
    }

    fn tokens(&self, text: &str) -> usize {
        estimate_or_count(&self.estimator, text)
    }
}

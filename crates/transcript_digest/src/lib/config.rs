use crate::error::ConfigError;

/// Tunables for the Extractive Summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractiveConfig {
    /// Share of sentences kept, before capping.
    pub proportion: f64,
    /// Absolute upper bound on sentences kept.
    pub max_sentences: usize,
    /// Terms beyond this many (most frequent first) are dropped from the matrix.
    pub max_vocabulary: usize,
    /// A lone sentence longer than this is cut to this many characters.
    pub single_sentence_chars: usize,
    /// How many leading sentences to return when ranking is impossible.
    pub fallback_sentences: usize,
}

impl Default for ExtractiveConfig {
    fn default() -> Self {
        Self {
            proportion: 0.2,
            max_sentences: 12,
            max_vocabulary: 1000,
            single_sentence_chars: 500,
            fallback_sentences: 3,
        }
    }
}

/// Budgets and thresholds for [`crate::SummaryPipeline`].
///
/// All budgets are in estimator units: model tokens when a tokenizer is configured,
/// whitespace-delimited words otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Transcripts with fewer words are rejected.
    pub min_words: usize,
    /// Largest input handed to the generative summarizer in one call.
    pub single_call_budget: usize,
    /// Budget for each chunk when the transcript has to be split.
    pub chunk_budget: usize,
    /// Floor of the per-chunk target length.
    pub min_target_length: usize,
    /// Requested minimum summary length, clamped below the target on every call.
    pub abstractive_min_length: usize,
    /// Concatenated chunk summaries above this size get one more reduction pass.
    pub reduce_threshold: usize,
    /// Character budget of the last-resort truncation.
    pub truncate_chars: usize,
    /// Block transcripts that do not read as English.
    pub require_english: bool,
    /// Smallest share of common English function words that passes the gate.
    pub english_min_ratio: f64,
    pub extractive: ExtractiveConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_words: 30,
            single_call_budget: 900,
            chunk_budget: 800,
            min_target_length: 30,
            abstractive_min_length: 40,
            reduce_threshold: 400,
            truncate_chars: 1500,
            require_english: false,
            english_min_ratio: 0.05,
            extractive: ExtractiveConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_words", self.min_words),
            ("single_call_budget", self.single_call_budget),
            ("chunk_budget", self.chunk_budget),
            ("min_target_length", self.min_target_length),
            ("reduce_threshold", self.reduce_threshold),
            ("truncate_chars", self.truncate_chars),
            ("extractive.max_sentences", self.extractive.max_sentences),
            ("extractive.max_vocabulary", self.extractive.max_vocabulary),
            (
                "extractive.single_sentence_chars",
                self.extractive.single_sentence_chars,
            ),
            (
                "extractive.fallback_sentences",
                self.extractive.fallback_sentences,
            ),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::NonPositive(*name));
        }

        if self.chunk_budget > self.single_call_budget {
            return Err(ConfigError::ChunkBudgetTooLarge {
                chunk_budget: self.chunk_budget,
                single_call_budget: self.single_call_budget,
            });
        }

        let proportion = self.extractive.proportion;
        if !(proportion > 0.0 && proportion <= 1.0) {
            return Err(ConfigError::Proportion(proportion));
        }

        if !(0.0..=1.0).contains(&self.english_min_ratio) {
            return Err(ConfigError::Ratio(self.english_min_ratio));
        }

        Ok(())
    }
}

use summary_cache::{InMemoryCache, SummaryCache};

use crate::{
    config::PipelineConfig,
    error::ConfigError,
    llm::{extractive::ExtractiveSummarizer, summarizer::Unavailable},
    text::{language::LanguageGate, safety::SafetyFilter, segmenter::NaiveSegmenter, segmenter::SentenceSegmenter},
    tokens::{TokenEstimator, WordCountEstimator},
    SummaryPipeline, Summarizer,
};

/// Selects every capability of a [`SummaryPipeline`] up front. Anything left unset
/// gets its naive implementation: no generative summarizer, word-count
/// estimation, period splitting and a fresh in-memory cache.
pub struct SummaryPipelineBuilder<
    S = Unavailable,
    E = WordCountEstimator,
    G = NaiveSegmenter,
    C = InMemoryCache,
> {
    config: PipelineConfig,
    safety: SafetyFilter,
    summarizer: S,
    estimator: E,
    segmenter: G,
    cache: C,
}

impl SummaryPipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            safety: SafetyFilter::default(),
            summarizer: Unavailable,
            estimator: WordCountEstimator,
            segmenter: NaiveSegmenter,
            cache: InMemoryCache::new(),
        }
    }
}

impl<S, E, G, C> SummaryPipelineBuilder<S, E, G, C> {
    pub fn summarizer<S2: Summarizer + Send + Sync>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<S2, E, G, C> {
        SummaryPipelineBuilder {
            config: self.config,
            safety: self.safety,
            summarizer,
            estimator: self.estimator,
            segmenter: self.segmenter,
            cache: self.cache,
        }
    }

    pub fn estimator<E2: TokenEstimator + Send + Sync>(
        self,
        estimator: E2,
    ) -> SummaryPipelineBuilder<S, E2, G, C> {
        SummaryPipelineBuilder {
            config: self.config,
            safety: self.safety,
            summarizer: self.summarizer,
            estimator,
            segmenter: self.segmenter,
            cache: self.cache,
        }
    }

    pub fn segmenter<G2: SentenceSegmenter + Send + Sync>(
        self,
        segmenter: G2,
    ) -> SummaryPipelineBuilder<S, E, G2, C> {
        SummaryPipelineBuilder {
            config: self.config,
            safety: self.safety,
            summarizer: self.summarizer,
            estimator: self.estimator,
            segmenter,
            cache: self.cache,
        }
    }

    pub fn cache<C2: SummaryCache + Send + Sync>(
        self,
        cache: C2,
    ) -> SummaryPipelineBuilder<S, E, G, C2> {
        SummaryPipelineBuilder {
            config: self.config,
            safety: self.safety,
            summarizer: self.summarizer,
            estimator: self.estimator,
            segmenter: self.segmenter,
            cache,
        }
    }

    pub fn safety_filter(mut self, safety: SafetyFilter) -> Self {
        self.safety = safety;
        self
    }
}

impl<S, E, G, C> SummaryPipelineBuilder<S, E, G, C>
where
    S: Summarizer + Send + Sync,
    E: TokenEstimator + Send + Sync,
    G: SentenceSegmenter + Send + Sync,
    C: SummaryCache + Send + Sync,
{
    pub fn build(self) -> Result<SummaryPipeline<S, E, G, C>, ConfigError> {
        self.config.validate()?;

        let language = self
            .config
            .require_english
            .then(|| LanguageGate::new(self.config.english_min_ratio));
        let extractive = ExtractiveSummarizer::new(self.config.extractive.clone());

        Ok(SummaryPipeline {
            config: self.config,
            safety: self.safety,
            language,
            extractive,
            summarizer: self.summarizer,
            estimator: self.estimator,
            segmenter: self.segmenter,
            cache: self.cache,
        })
    }
}

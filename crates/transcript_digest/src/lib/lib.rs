pub mod chunker;
pub mod config;
pub mod error;
mod llm;
mod pipeline;
pub mod text;
pub mod tokens;
pub mod tracing;
pub mod transcript;

pub use llm::{abstractive, extractive, openai};
pub use llm::summarizer::{Summarizer, SummaryResponse, Unavailable};
pub use pipeline::{builder::SummaryPipelineBuilder, content_fingerprint, strategy, SummaryPipeline};
pub use summary_cache::{CacheKey, InMemoryCache, SummaryCache, SummaryResult, SummaryStatus};

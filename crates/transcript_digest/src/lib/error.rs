use std::path::PathBuf;

/// Failure of an external capability: the generative summarizer, the tokenizer or
/// the sentence detector. Always recovered by the next strategy in line.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("capability is not available")]
    Unavailable,
    #[error("summarizer failed: {0}")]
    Summarizer(String),
    #[error("tokenizer failed: {0}")]
    Tokenizer(String),
    #[error("sentence segmenter failed: {0}")]
    Segmenter(String),
    #[error("degenerate input: {0}")]
    Degenerate(&'static str),
    #[error("capability returned empty output")]
    EmptyOutput,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{0}` must be greater than zero")]
    NonPositive(&'static str),
    #[error("chunk budget ({chunk_budget}) must not exceed the single-call budget ({single_call_budget})")]
    ChunkBudgetTooLarge {
        chunk_budget: usize,
        single_call_budget: usize,
    },
    #[error("extractive proportion must be in (0, 1], got {0}")]
    Proportion(f64),
    #[error("english marker ratio must be in [0, 1], got {0}")]
    Ratio(f64),
    #[error("failed to read keyword file {path}: {source}")]
    KeywordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("no video id found in {0:?}")]
    InvalidUrl(String),
}

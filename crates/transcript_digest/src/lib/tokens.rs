//! # Token-budget estimation
//!
//! Every budget in the pipeline is expressed in "estimator units". With a
//! tokenizer configured those are model tokens; without one they are
//! whitespace-delimited words.

use another_tiktoken_rs::{cl100k_base, CoreBPE};

use crate::{error::CapabilityError, text::word_count};

pub trait TokenEstimator {
    fn estimate(&self, text: &str) -> Result<usize, CapabilityError>;
}

impl<T: TokenEstimator + ?Sized> TokenEstimator for Box<T> {
    fn estimate(&self, text: &str) -> Result<usize, CapabilityError> {
        (**self).estimate(text)
    }
}

impl<T: TokenEstimator + ?Sized> TokenEstimator for &T {
    fn estimate(&self, text: &str) -> Result<usize, CapabilityError> {
        (**self).estimate(text)
    }
}

/// One unit per whitespace-delimited word.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCountEstimator;

impl TokenEstimator for WordCountEstimator {
    fn estimate(&self, text: &str) -> Result<usize, CapabilityError> {
        Ok(word_count(text))
    }
}

/// BPE token counts using the `cl100k_base` vocabulary.
pub struct TiktokenEstimator {
    bpe: CoreBPE,
}

impl TiktokenEstimator {
    pub fn new() -> Result<Self, CapabilityError> {
        let bpe = cl100k_base()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load cl100k_base vocabulary"))
            .map_err(|e| CapabilityError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenEstimator for TiktokenEstimator {
    fn estimate(&self, text: &str) -> Result<usize, CapabilityError> {
        Ok(self.bpe.encode_ordinary(text).len())
    }
}

/// Infallible count: a failing estimator degrades to the word count for this call.
pub fn estimate_or_count<E: TokenEstimator + ?Sized>(estimator: &E, text: &str) -> usize {
    estimator.estimate(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Token estimator failed, using word count");
        word_count(text)
    })
}

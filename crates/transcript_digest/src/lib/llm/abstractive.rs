//! Adapter over a generative [`Summarizer`]: clamps the length window and turns
//! every failure mode into a [`CapabilityError`].

use crate::{error::CapabilityError, Summarizer};

/// `min_length` is kept strictly below `target_length` (and never underflows).
pub fn clamp_min_length(target_length: usize, min_length: usize) -> usize {
    min_length.min(target_length.saturating_sub(1))
}

#[tracing::instrument(skip(summarizer, text), fields(model = S::SUMMARIZER_MODEL, chars = text.len()))]
pub async fn generate<S: Summarizer>(
    summarizer: &S,
    text: &str,
    target_length: usize,
    min_length: usize,
) -> Result<String, CapabilityError> {
    let min_length = clamp_min_length(target_length, min_length);

    let response = summarizer
        .summarize(text, target_length, min_length)
        .await
        .map_err(|e| CapabilityError::Summarizer(e.to_string()))?;

    let summary = response.summary.trim();
    if summary.is_empty() {
        return Err(CapabilityError::EmptyOutput);
    }
    Ok(summary.to_string())
}

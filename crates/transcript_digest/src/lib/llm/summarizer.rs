use std::{
    fmt::{Debug, Display},
    future::Future,
};

use serde::Deserialize;

use crate::error::CapabilityError;

/// A generative summarization capability.
///
/// `max_length` and `min_length` are target lengths in estimator units; an
/// implementation should decode greedily so identical input gives identical output.
pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug + Display;

    fn summarize(
        &self,
        content: &str,
        max_length: usize,
        min_length: usize,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Stands in for a summarizer that is not configured; every call fails, so the
/// pipeline always takes the extractive path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Summarizer for Unavailable {
    const SUMMARIZER_MODEL: &'static str = "none";
    type Error = CapabilityError;

    async fn summarize(
        &self,
        _content: &str,
        _max_length: usize,
        _min_length: usize,
    ) -> Result<SummaryResponse, Self::Error> {
        Err(CapabilityError::Unavailable)
    }
}

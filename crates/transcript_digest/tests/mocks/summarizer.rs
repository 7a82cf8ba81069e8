use std::sync::{Arc, Mutex};

use transcript_digest::{Summarizer, SummaryResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeCall {
    pub content: String,
    pub max_length: usize,
    pub min_length: usize,
}

#[derive(Debug, Clone)]
enum Behaviour {
    Fixed(String),
    /// First `max_length` words of the input, as a greedy decoder might produce.
    LeadingWords,
    Failing(String),
}

#[derive(Debug, Clone)]
pub struct MockSummarizer {
    behaviour: Behaviour,
    pub calls: Arc<Mutex<Vec<SummarizeCall>>>,
}

impl MockSummarizer {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new(summary: &str) -> Self {
        Self::with(Behaviour::Fixed(summary.to_string()))
    }

    pub fn leading_words() -> Self {
        Self::with(Behaviour::LeadingWords)
    }

    pub fn failing(msg: &str) -> Self {
        Self::with(Behaviour::Failing(msg.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-summarizer";
    type Error = anyhow::Error;

    async fn summarize(
        &self,
        content: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<SummaryResponse, Self::Error> {
        self.calls.lock().unwrap().push(SummarizeCall {
            content: content.to_string(),
            max_length,
            min_length,
        });

        let summary = match &self.behaviour {
            Behaviour::Fixed(summary) => summary.clone(),
            Behaviour::LeadingWords => content
                .split_whitespace()
                .take(max_length)
                .collect::<Vec<_>>()
                .join(" "),
            Behaviour::Failing(msg) => return Err(anyhow::anyhow!("{}", msg)),
        };
        Ok(SummaryResponse { summary })
    }
}

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

use crate::{Summarizer, SummaryResponse};

const MAX_RETRIES: u32 = 3;

#[derive(Clone)]
pub struct OpenAIClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No content in completion response")]
    EmptyCompletion,
}

impl OpenAIClient {
    const SYSTEM_PROMPT: &str = include_str!("./prompts/system_0.txt");

    pub fn new(api_key: impl Into<String>) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
            model: <Self as Summarizer>::SUMMARIZER_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Lengths are in words; the token cap leaves headroom for tokens-per-word.
    fn user_prompt(content: &str, max_length: usize, min_length: usize) -> String {
        format!(
            "Summarize the following transcript in {min_length} to {max_length} words.\n\nTranscript:\n{content}"
        )
    }

    pub async fn send_completion_request(
        &self,
        user_content: impl Into<String>,
        max_tokens: usize,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0,
            "max_tokens": max_tokens,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|content| !content.trim().is_empty())
    }
}

impl Summarizer for OpenAIClient {
    const SUMMARIZER_MODEL: &'static str = "gpt-4o-mini";
    type Error = OpenAIError;

    async fn summarize(
        &self,
        content: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<SummaryResponse, Self::Error> {
        let prompt = Self::user_prompt(content, max_length, min_length);
        let response = self
            .send_completion_request(prompt, max_length.saturating_mul(2).max(64))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = response
            .first_content()
            .ok_or(OpenAIError::EmptyCompletion)?
            .to_string();

        Ok(SummaryResponse { summary })
    }
}

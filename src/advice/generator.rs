//! Text generator client
//!
//! Trait seam for prompt-in/text-out generation plus the Groq
//! chat-completions implementation behind it.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

/// Default Groq model
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Groq OpenAI-compatible chat completions endpoint
const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Text generation error types
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Remote service error: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Remote service returned a malformed response")]
    MalformedResponse,

    #[error("GROQ_API_KEY environment variable is not set")]
    MissingApiKey,
}

/// Prompt-in, text-out generation seam.
///
/// Callers treat this as an operation that may suspend and may fail;
/// deterministic plan fields must never depend on it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Groq chat-completions client
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    /// Create a client with an explicit key and model
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Create a client from `GROQ_API_KEY` and optional `GROQ_MODEL`
    pub fn from_env() -> Result<Self, GeneratorError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| GeneratorError::MissingApiKey)?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(GeneratorError::MalformedResponse)?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_api_key() {
        // Ensure the variable is not inherited from the test environment
        std::env::remove_var("GROQ_API_KEY");
        assert!(matches!(
            GroqClient::from_env(),
            Err(GeneratorError::MissingApiKey)
        ));
    }
}

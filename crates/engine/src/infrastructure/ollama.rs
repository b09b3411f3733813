//! Ollama text-generation client (native generate API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    Completion, CompletionRequest, SamplingOptions, TextGenError, TextGenPort,
};

/// Client for Ollama's `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model for Ollama.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        // Use 120 second timeout for generation requests (they can be slow)
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create client from environment variables.
    ///
    /// Uses `OLLAMA_BASE_URL` and `OLLAMA_MODEL` environment variables,
    /// falling back to defaults if not set.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string());
        let model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string());
        Self::new(&base_url, &model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_generate(&self, body: &GenerateRequest) -> Result<GenerateResponse, TextGenError> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| TextGenError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| TextGenError::RequestFailed(e.to_string()))?;
            return Err(TextGenError::RequestFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| TextGenError::InvalidResponse(e.to_string()))
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL)
    }
}

#[async_trait]
impl TextGenPort for OllamaClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, TextGenError> {
        let api_request = GenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            stream: false,
            options: Some(GenerateOptions::from(&request.options)),
        };

        let api_response = self.post_generate(&api_request).await?;

        Ok(Completion {
            text: api_response.response,
            model: api_response.model,
        })
    }

    async fn warmup(&self) -> Result<(), TextGenError> {
        // An empty prompt instructs Ollama to load the model into memory
        // without generating anything.
        let api_request = GenerateRequest {
            model: self.model.clone(),
            prompt: String::new(),
            stream: false,
            options: None,
        };

        self.post_generate(&api_request).await.map(|_| ())
    }
}

// =============================================================================
// Ollama API types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_gpu: Option<u32>,
}

impl From<&SamplingOptions> for GenerateOptions {
    fn from(opts: &SamplingOptions) -> Self {
        Self {
            num_predict: opts.num_predict,
            temperature: opts.temperature,
            top_p: opts.top_p,
            repeat_penalty: opts.repeat_penalty,
            seed: opts.seed,
            main_gpu: opts.main_gpu,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    model: String,
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_into_ollama_shape() {
        let opts = GenerateOptions::from(&SamplingOptions::default());
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["num_predict"], 450);
        assert_eq!(json["repeat_penalty"], 1.15);
        // Unset seed and GPU placement are omitted entirely
        assert!(json.get("seed").is_none());
        assert!(json.get("main_gpu").is_none());
    }

    #[test]
    fn pinned_seed_is_serialized() {
        let opts = GenerateOptions::from(&SamplingOptions {
            seed: Some(42),
            ..SamplingOptions::default()
        });
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["seed"], 42);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2");
        assert_eq!(client.base_url, "http://localhost:11434");
    }
}

//! Text-generation port: the trait and value types the engine uses to talk
//! to whatever serves the pre-trained model.

use async_trait::async_trait;

/// Decoding parameters for a completion call.
///
/// These are generation-quality tuning, not correctness-critical. Defaults
/// bias toward varied, non-repetitive prose within a bounded length.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingOptions {
    /// Maximum number of tokens to generate.
    pub num_predict: u32,
    /// Sampling temperature (higher = more creative).
    pub temperature: f32,
    /// Nucleus-sampling cutoff.
    pub top_p: f32,
    /// Penalty applied to repeated tokens.
    pub repeat_penalty: f32,
    /// Fixed seed for reproducible output; unset means vary per request.
    pub seed: Option<i64>,
    /// GPU index to place the model on, when the backend supports it.
    pub main_gpu: Option<u32>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            num_predict: 450,
            temperature: 0.85,
            top_p: 0.92,
            repeat_penalty: 1.15,
            seed: None,
            main_gpu: None,
        }
    }
}

impl SamplingOptions {
    /// Build options from `STORYFORGE_*` environment variables, falling
    /// back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            num_predict: env_parse("STORYFORGE_NUM_PREDICT", defaults.num_predict),
            temperature: env_parse("STORYFORGE_TEMPERATURE", defaults.temperature),
            top_p: env_parse("STORYFORGE_TOP_P", defaults.top_p),
            repeat_penalty: env_parse("STORYFORGE_REPEAT_PENALTY", defaults.repeat_penalty),
            seed: env_opt("STORYFORGE_SEED"),
            main_gpu: env_opt("STORYFORGE_MAIN_GPU"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}

/// A single completion request: raw prompt plus decoding parameters.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub options: SamplingOptions,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: SamplingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }
}

/// Raw output of a completion call.
///
/// `text` is the model's output as returned; completion models may echo the
/// prompt as a prefix, which callers are expected to strip.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Identifier of the model that produced the text.
    pub model: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TextGenError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The external text-generation capability.
///
/// Implementations must be safe for concurrent invocation; the engine holds
/// one instance for the process lifetime and calls it from every request.
#[async_trait]
pub trait TextGenPort: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, TextGenError>;

    /// Ask the backend to load the model into memory, returning once it is
    /// ready to serve. Called once at startup; failure is fatal.
    async fn warmup(&self) -> Result<(), TextGenError>;
}

//! Story generation: prompt assembly, one completion call, output cleanup.

use std::sync::Arc;

use storyforge_domain::{Level, Story, Theme};

use crate::infrastructure::ports::{
    CompletionRequest, SamplingOptions, TextGenError, TextGenPort,
};
use crate::prompt_templates::PromptTemplates;

/// Minimum cleaned length (in characters) for model output to count as a
/// story; anything shorter is treated as a failed generation.
pub const DEFAULT_MIN_STORY_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("Story generation failed: {0}")]
    Generation(#[from] TextGenError),

    #[error("Generated story too short: {chars} chars (minimum {min})")]
    TooShort { chars: usize, min: usize },
}

/// Orchestrates a single generation request against the text-gen port.
///
/// Errors are captured and reported, never retried; callers decide whether
/// to degrade to fallback content.
pub struct StoryService {
    llm: Arc<dyn TextGenPort>,
    templates: PromptTemplates,
    sampling: SamplingOptions,
    min_story_chars: usize,
}

impl StoryService {
    pub fn new(
        llm: Arc<dyn TextGenPort>,
        templates: PromptTemplates,
        sampling: SamplingOptions,
    ) -> Self {
        Self {
            llm,
            templates,
            sampling,
            min_story_chars: DEFAULT_MIN_STORY_CHARS,
        }
    }

    pub fn with_min_story_chars(mut self, min_story_chars: usize) -> Self {
        self.min_story_chars = min_story_chars;
        self
    }

    pub async fn generate(
        &self,
        topic: &str,
        theme: Theme,
        level: Level,
    ) -> Result<Story, StoryError> {
        let prompt = self.templates.build(topic, theme, level);

        tracing::info!(topic, theme = %theme, level = %level, "Generating story");

        let request =
            CompletionRequest::new(prompt.as_str()).with_options(self.sampling.clone());
        let completion = self.llm.complete(request).await?;

        let text = clean_output(&prompt, &completion.text);
        let chars = text.chars().count();
        if chars < self.min_story_chars {
            return Err(StoryError::TooShort {
                chars,
                min: self.min_story_chars,
            });
        }

        tracing::info!(chars, model = %completion.model, "Story generated");

        Ok(Story::generated(text, completion.model))
    }
}

/// Clean raw model output: strip the echoed prompt prefix if present, drop
/// a leading completion label, then remove blank lines and per-line
/// whitespace, preserving line order.
fn clean_output(prompt: &str, raw: &str) -> String {
    let without_prompt = raw.strip_prefix(prompt).unwrap_or(raw);
    let mut text = without_prompt.trim_start();

    // Completion models sometimes restate their cue on the first line.
    for label in ["Story:", "Answer:", "Response:"] {
        if text.len() >= label.len()
            && text.as_bytes()[..label.len()].eq_ignore_ascii_case(label.as_bytes())
        {
            text = &text[label.len()..];
            break;
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

//! Story - the tagged result of a generation request.

use serde::{Deserialize, Serialize};

/// Where a story's text came from.
///
/// Keeping provenance explicit lets callers distinguish live model output
/// from canned content without sniffing the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorySource {
    Generated,
    Fallback,
}

/// A finished story: cleaned text plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub text: String,
    pub source: StorySource,
    /// Model identifier for generated stories; `None` for fallback content.
    pub model: Option<String>,
}

impl Story {
    pub fn generated(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: StorySource::Generated,
            model: Some(model.into()),
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: StorySource::Fallback,
            model: None,
        }
    }
}

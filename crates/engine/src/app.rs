//! Application state and composition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::infrastructure::ports::{SamplingOptions, TextGenPort};
use crate::prompt_templates::PromptTemplates;
use crate::use_cases::{FallbackLibrary, StoryService};

/// Main application state.
///
/// Holds the story service, the fallback library, and the process-wide
/// readiness flag. Passed to HTTP handlers via Axum state.
pub struct App {
    pub story: StoryService,
    pub fallback: FallbackLibrary,
    prefer_fallback: bool,
    model_ready: AtomicBool,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        llm: Arc<dyn TextGenPort>,
        templates: PromptTemplates,
        sampling: SamplingOptions,
        prefer_fallback: bool,
    ) -> Self {
        Self {
            story: StoryService::new(llm, templates, sampling),
            fallback: FallbackLibrary::default(),
            prefer_fallback,
            model_ready: AtomicBool::new(false),
        }
    }

    /// Whether canned stories should be served without touching the model.
    pub fn prefer_fallback(&self) -> bool {
        self.prefer_fallback
    }

    /// Whether the generation capability finished loading.
    pub fn model_ready(&self) -> bool {
        self.model_ready.load(Ordering::Acquire)
    }

    /// Flip the readiness flag once startup warmup completes.
    pub fn mark_model_ready(&self) {
        self.model_ready.store(true, Ordering::Release);
    }
}

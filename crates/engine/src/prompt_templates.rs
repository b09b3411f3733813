//! Configurable prompt templates and the prompt builder.
//!
//! Templates carry a `{topic}` placeholder that is replaced with the
//! canonicalized topic at build time. Every template can be overridden
//! through a `STORYFORGE_PROMPT_*` environment variable; defaults are
//! compiled in.

use std::collections::HashMap;

use storyforge_domain::{canonicalize_topic, Level, Theme};

/// All prompt template keys as constants.
pub mod keys {
    // === Theme frameworks ===
    pub const THEME_ADVENTURE: &str = "theme.adventure";
    pub const THEME_SCI_FI: &str = "theme.sci-fi";
    pub const THEME_MYSTERY: &str = "theme.mystery";
    pub const THEME_FANTASY: &str = "theme.fantasy";

    // === Level instructions ===
    pub const LEVEL_BEGINNER: &str = "level.beginner";
    pub const LEVEL_ADVANCED: &str = "level.advanced";

    // === Fixed structural blocks ===
    /// Requirements appended to every prompt.
    pub const STORY_REQUIREMENTS: &str = "story.requirements";
    /// Generation cue the prompt ends with.
    pub const GENERATION_CUE: &str = "story.cue";
}

/// Default values for all prompt templates.
pub mod defaults {
    pub const THEME_ADVENTURE: &str = "Create an exciting adventure story where the hero must understand {topic} to overcome challenges and complete their quest. Include dramatic moments and character development.";

    pub const THEME_SCI_FI: &str = "Write a science fiction story where {topic} is a crucial technology in a futuristic world. Use space, AI, and advanced technology concepts to explain the data structure.";

    pub const THEME_MYSTERY: &str = "Craft a detective mystery where understanding {topic} helps solve an intriguing case. Include clues, puzzles, and revelations that teach the concept.";

    pub const THEME_FANTASY: &str = "Create a fantasy tale with magical elements representing {topic}. Use wizards, spells, magical creatures, and kingdoms to explain the data structure in an enchanting way.";

    pub const LEVEL_BEGINNER: &str = "Explain {topic} to a complete beginner using simple, everyday analogies. Avoid technical jargon. Make it fun and easy to understand for someone new to programming.";

    pub const LEVEL_ADVANCED: &str = "Explain {topic} with technical depth. Include time/space complexity, real-world applications, and implementation details. Use proper computer science terminology.";

    pub const STORY_REQUIREMENTS: &str = r#"Story Requirements:
- Length: 250-350 words
- Include a clear analogy that explains {topic}
- Make it engaging and educational
- End with a key takeaway"#;

    pub const GENERATION_CUE: &str = "Story:";
}

/// Convert a template key to its environment variable name.
pub fn key_to_env_var(key: &str) -> String {
    format!(
        "STORYFORGE_PROMPT_{}",
        key.to_uppercase().replace(['.', '-'], "_")
    )
}

fn theme_key(theme: Theme) -> &'static str {
    match theme {
        Theme::Adventure => keys::THEME_ADVENTURE,
        Theme::SciFi => keys::THEME_SCI_FI,
        Theme::Mystery => keys::THEME_MYSTERY,
        Theme::Fantasy => keys::THEME_FANTASY,
    }
}

fn level_key(level: Level) -> &'static str {
    match level {
        Level::Beginner => keys::LEVEL_BEGINNER,
        Level::Advanced => keys::LEVEL_ADVANCED,
    }
}

fn default_for_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Adventure => defaults::THEME_ADVENTURE,
        Theme::SciFi => defaults::THEME_SCI_FI,
        Theme::Mystery => defaults::THEME_MYSTERY,
        Theme::Fantasy => defaults::THEME_FANTASY,
    }
}

fn default_for_level(level: Level) -> &'static str {
    match level {
        Level::Beginner => defaults::LEVEL_BEGINNER,
        Level::Advanced => defaults::LEVEL_ADVANCED,
    }
}

/// Immutable template mappings, built once at startup.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    themes: HashMap<Theme, String>,
    levels: HashMap<Level, String>,
    requirements: String,
    cue: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        let themes = Theme::ALL
            .into_iter()
            .map(|t| (t, default_for_theme(t).to_string()))
            .collect();
        let levels = Level::ALL
            .into_iter()
            .map(|l| (l, default_for_level(l).to_string()))
            .collect();

        Self {
            themes,
            levels,
            requirements: defaults::STORY_REQUIREMENTS.to_string(),
            cue: defaults::GENERATION_CUE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Build templates with any `STORYFORGE_PROMPT_*` overrides applied.
    pub fn from_env() -> Self {
        let mut templates = Self::default();

        for theme in Theme::ALL {
            if let Ok(value) = std::env::var(key_to_env_var(theme_key(theme))) {
                templates.themes.insert(theme, value);
            }
        }
        for level in Level::ALL {
            if let Ok(value) = std::env::var(key_to_env_var(level_key(level))) {
                templates.levels.insert(level, value);
            }
        }
        if let Ok(value) = std::env::var(key_to_env_var(keys::STORY_REQUIREMENTS)) {
            templates.requirements = value;
        }
        if let Ok(value) = std::env::var(key_to_env_var(keys::GENERATION_CUE)) {
            templates.cue = value;
        }

        templates
    }

    /// The narrative framework sentence for a theme.
    pub fn framework(&self, theme: Theme) -> &str {
        self.themes
            .get(&theme)
            .map(String::as_str)
            .unwrap_or_else(|| default_for_theme(theme))
    }

    /// The instructional-depth sentence for a level.
    pub fn instruction(&self, level: Level) -> &str {
        self.levels
            .get(&level)
            .map(String::as_str)
            .unwrap_or_else(|| default_for_level(level))
    }

    /// Assemble the full prompt: theme framework, level instruction, the
    /// requirements block, then the generation cue, separated by blank
    /// lines. The topic is canonicalized before substitution.
    pub fn build(&self, topic: &str, theme: Theme, level: Level) -> String {
        let topic = canonicalize_topic(topic);
        let framework = self.framework(theme).replace("{topic}", &topic);
        let instruction = self.instruction(level).replace("{topic}", &topic);
        let requirements = self.requirements.replace("{topic}", &topic);

        format!(
            "{framework}\n\n{instruction}\n\n{requirements}\n\n{cue}",
            cue = self.cue
        )
    }
}

//! Theme - the narrative genre framing applied to an explanation.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Narrative styles the prompt builder has a framework sentence for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Adventure,
    SciFi,
    Mystery,
    Fantasy,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Adventure, Theme::SciFi, Theme::Mystery, Theme::Fantasy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Adventure => "adventure",
            Theme::SciFi => "sci-fi",
            Theme::Mystery => "mystery",
            Theme::Fantasy => "fantasy",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adventure" => Ok(Theme::Adventure),
            "sci-fi" | "scifi" => Ok(Theme::SciFi),
            "mystery" => Ok(Theme::Mystery),
            "fantasy" => Ok(Theme::Fantasy),
            _ => Err(DomainError::UnknownTheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_sci_fi_spellings() {
        assert_eq!("sci-fi".parse::<Theme>().unwrap(), Theme::SciFi);
        assert_eq!("SciFi".parse::<Theme>().unwrap(), Theme::SciFi);
    }

    #[test]
    fn parse_rejects_unknown_themes() {
        assert!("western".parse::<Theme>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }
}

//! Topic - the data-structure/algorithm subject of a story.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The fixed set of subjects stories can be generated about.
///
/// Wire form is kebab-case (`linked-lists`); parsing is case-insensitive
/// and also accepts the space-separated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Arrays,
    Stacks,
    Queues,
    LinkedLists,
    Trees,
    Graphs,
    Sorting,
    Recursion,
}

impl Topic {
    /// All topics, in the order the selection widgets present them.
    pub const ALL: [Topic; 8] = [
        Topic::Arrays,
        Topic::Stacks,
        Topic::Queues,
        Topic::LinkedLists,
        Topic::Trees,
        Topic::Graphs,
        Topic::Sorting,
        Topic::Recursion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Arrays => "arrays",
            Topic::Stacks => "stacks",
            Topic::Queues => "queues",
            Topic::LinkedLists => "linked-lists",
            Topic::Trees => "trees",
            Topic::Graphs => "graphs",
            Topic::Sorting => "sorting",
            Topic::Recursion => "recursion",
        }
    }

    /// Canonical form used inside prompts ("Linked Lists").
    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Arrays => "Arrays",
            Topic::Stacks => "Stacks",
            Topic::Queues => "Queues",
            Topic::LinkedLists => "Linked Lists",
            Topic::Trees => "Trees",
            Topic::Graphs => "Graphs",
            Topic::Sorting => "Sorting",
            Topic::Recursion => "Recursion",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrays" => Ok(Topic::Arrays),
            "stacks" => Ok(Topic::Stacks),
            "queues" => Ok(Topic::Queues),
            "linked-lists" | "linked lists" => Ok(Topic::LinkedLists),
            "trees" => Ok(Topic::Trees),
            "graphs" => Ok(Topic::Graphs),
            "sorting" => Ok(Topic::Sorting),
            "recursion" => Ok(Topic::Recursion),
            _ => Err(DomainError::UnknownTopic(s.to_string())),
        }
    }
}

/// Canonicalize free-form topic text for prompt substitution: hyphens
/// become spaces, each word is title-cased.
///
/// Applying this to already-canonical text yields the same string.
pub fn canonicalize_topic(raw: &str) -> String {
    raw.replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("ARRAYS".parse::<Topic>().unwrap(), Topic::Arrays);
        assert_eq!("Linked-Lists".parse::<Topic>().unwrap(), Topic::LinkedLists);
        assert_eq!("linked lists".parse::<Topic>().unwrap(), Topic::LinkedLists);
    }

    #[test]
    fn parse_rejects_unknown_topics() {
        assert!("hash-maps".parse::<Topic>().is_err());
    }

    #[test]
    fn wire_form_is_kebab_case() {
        let json = serde_json::to_string(&Topic::LinkedLists).unwrap();
        assert_eq!(json, "\"linked-lists\"");
        let back: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Topic::LinkedLists);
    }

    #[test]
    fn canonicalize_replaces_hyphens_and_title_cases() {
        assert_eq!(canonicalize_topic("linked-lists"), "Linked Lists");
        assert_eq!(canonicalize_topic("arrays"), "Arrays");
        assert_eq!(canonicalize_topic("BINARY search"), "Binary Search");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        for raw in ["linked-lists", "Linked Lists", "sorting", "  graphs  "] {
            let once = canonicalize_topic(raw);
            assert_eq!(canonicalize_topic(&once), once);
        }
    }

    #[test]
    fn display_name_matches_canonicalized_wire_form() {
        for topic in Topic::ALL {
            assert_eq!(canonicalize_topic(topic.as_str()), topic.display_name());
        }
    }
}

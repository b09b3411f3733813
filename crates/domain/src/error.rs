//! Unified error type for domain parsing.

use thiserror::Error;

/// Parse failures for the enumerated choice sets.
///
/// These indicate a caller supplied a value outside the fixed sets the UI
/// widgets bind to - a request-scoped defect, never fatal to the process.
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Unknown story theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown difficulty level: {0}")]
    UnknownLevel(String),
}

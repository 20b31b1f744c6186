//! Centralized error handling with typed error enums.
//!
//! Errors are designed to:
//! - Provide detailed context via Debug for logging (`{:?}`)
//! - Provide concise, gateway-safe messages via Display (`{}`)
//! - Enable pattern matching for programmatic handling
//!
//! # Error hierarchy
//!
//! ```text
//! EngineError (top-level)
//! ├── Config(ConfigError)   - construction-time misconfiguration
//! ├── Catalog(CatalogError) - duplicate/unknown tool names
//! └── Internal              - broken invariant, never silently swallowed
//! ```
//!
//! Empty input, an unknown session id on `reset`, and a duplicate tool name
//! returned from `add_tools` as a report are normal control flow, not
//! `Result::Err` — see `crate::catalog::AddToolsReport`.

use thiserror::Error;

use crate::types::ToolName;

/// A specialized Result type for engine-internal operations that need
/// `anyhow`-style context chaining but whose callers don't match on cause.
pub type Result<T> = anyhow::Result<T>;

/// Top-level error type for engine construction and catalog mutation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid `EngineConfig` supplied to `SuggestionEngine::new`.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Catalog mutation rejected.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Broken invariant — a bug, not a user input problem.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl EngineError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Optional guidance text for callers surfacing this to a human.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::Config(e) => e.help(),
            Self::Catalog(e) => e.help(),
            Self::Internal { .. } => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self.help() {
            Some(help) => format!("{}\n\n{}", self, help),
            None => self.to_string(),
        }
    }
}

/// Errors in `EngineConfig` that prevent constructing a `SuggestionEngine`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `top_k` must be at least 1.
    #[error("top_k must be at least 1, got {value}")]
    TopKZero { value: usize },

    /// `combine_strategy` named something other than "max" or "sum".
    #[error("unknown combine strategy '{value}', expected \"max\" or \"sum\"")]
    InvalidCombineStrategy { value: String },

    /// `min_score` is negative.
    #[error("min_score must be non-negative, got {value}")]
    NegativeMinScore { value: f32 },

    /// `max_intents` must be at least 1.
    #[error("max_intents must be at least 1, got {value}")]
    MaxIntentsZero { value: usize },
}

impl ConfigError {
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::TopKZero { .. } => Some("Set top_k to the number of suggestions to return per query (typically 3-10)."),
            Self::InvalidCombineStrategy { .. } => {
                Some("combine_strategy must be exactly \"max\" or \"sum\".")
            }
            Self::NegativeMinScore { .. } => Some("min_score filters suggestions below a relevance floor; it cannot be negative."),
            Self::MaxIntentsZero { .. } => Some("max_intents bounds how many separator-delimited windows the segmenter produces; set to at least 1."),
        }
    }
}

/// Errors rejecting a catalog mutation.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// `add_tools` was given a name already present in the catalog.
    #[error("tool '{name}' already exists in the catalog")]
    DuplicateTool { name: ToolName },

    /// `remove_tool` was given a name not present in the catalog.
    #[error("tool '{name}' is not in the catalog")]
    UnknownTool { name: ToolName },
}

impl CatalogError {
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateTool { .. } => {
                Some("Remove the existing tool first, or choose a different name.")
            }
            Self::UnknownTool { .. } => Some("Check the tool name against the current catalog (see SuggestionEngine::stats)."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn engine_error_user_message_includes_help() {
        let err = EngineError::Config(ConfigError::TopKZero { value: 0 });
        let msg = err.user_message();
        check!(msg.contains("top_k must be at least 1"));
        check!(msg.contains("Set top_k"));
    }

    #[test]
    fn config_error_help_present_for_all_variants() {
        check!(ConfigError::TopKZero { value: 0 }.help().is_some());
        check!(
            ConfigError::InvalidCombineStrategy {
                value: "avg".into()
            }
            .help()
            .is_some()
        );
        check!(
            ConfigError::NegativeMinScore { value: -1.0 }
                .help()
                .is_some()
        );
        check!(ConfigError::MaxIntentsZero { value: 0 }.help().is_some());
    }

    #[test]
    fn catalog_error_display_includes_tool_name() {
        let name = ToolName::new("export_csv").unwrap();
        let err = CatalogError::DuplicateTool { name };
        check!(err.to_string().contains("export_csv"));
    }

    #[test]
    fn internal_error_carries_optional_source() {
        let err = EngineError::internal("index out of sync");
        check!(err.help().is_none());
        check!(err.to_string().contains("index out of sync"));
    }
}

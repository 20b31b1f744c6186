//! `SuggestionEngine`: the orchestrator wiring catalog, sessions,
//! tokenizer, segmenter, and ranker into the `submit`/`feed`/`reset` API a
//! gateway calls against.

use serde::{Deserialize, Serialize};

use crate::catalog::{AddToolsReport, Catalog, Suggestion, ToolSpec, to_suggestion};
use crate::error::{ConfigError, EngineError};
use crate::search::{IntentSegmenter, RankedTool, Ranker, segmenter::combine, tokenize};
use crate::session::SessionStore;
use crate::types::{LocaleSet, SessionId, ToolName};

/// Construction parameters for a `SuggestionEngine`.
///
/// `Deserialize`-able so a gateway can load it from its own config file and
/// pass it through unchanged; validated in [`EngineConfig::validate`],
/// called from [`SuggestionEngine::new`] before any index is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum suggestions returned per query.
    pub top_k: usize,
    /// Suggestions scoring below this floor are dropped.
    pub min_score: f32,
    /// How per-intent-window scores are merged: `"max"` or `"sum"`.
    pub combine_strategy: String,
    /// Maximum number of intent windows the segmenter produces.
    pub max_intents: usize,
    /// Locale hints selecting the stopword/separator sets — additive, not
    /// exclusive: every recognized locale in the list contributes its set.
    /// Unrecognized/empty falls back to the full default (see DESIGN.md).
    pub locales: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_score: 1.0,
            combine_strategy: "max".to_string(),
            max_intents: 1,
            locales: vec!["pt".to_string(), "en".to_string()],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::TopKZero { value: self.top_k });
        }
        if self.min_score < 0.0 {
            return Err(ConfigError::NegativeMinScore {
                value: self.min_score,
            });
        }
        if self.max_intents == 0 {
            return Err(ConfigError::MaxIntentsZero {
                value: self.max_intents,
            });
        }
        crate::search::CombineStrategy::parse(&self.combine_strategy)?;
        Ok(())
    }
}

/// Introspection snapshot for health checks, not part of the ranking path.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub tool_count: usize,
    pub term_count: usize,
    pub session_count: usize,
}

/// The suggestion engine: catalog + sessions + the tokenize → segment →
/// rank pipeline.
pub struct SuggestionEngine {
    catalog: Catalog,
    sessions: SessionStore,
    config: EngineConfig,
    locales: LocaleSet,
    combine_strategy: crate::search::CombineStrategy,
}

impl SuggestionEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let locales = LocaleSet::parse(&config.locales);
        let combine_strategy = crate::search::CombineStrategy::parse(&config.combine_strategy)?;
        Ok(Self {
            catalog: Catalog::new(),
            sessions: SessionStore::new(),
            config,
            locales,
            combine_strategy,
        })
    }

    pub fn with_tools(config: EngineConfig, tools: Vec<ToolSpec>) -> Result<Self, EngineError> {
        let engine = Self::new(config)?;
        engine.add_tools(tools);
        Ok(engine)
    }

    /// Register tools. Duplicates are reported, not raised as an error.
    pub fn add_tools(&self, tools: Vec<ToolSpec>) -> AddToolsReport {
        self.catalog.add_tools(tools, &self.locales)
    }

    /// Remove one tool. Unknown names are raised as `EngineError`, since
    /// unlike a session reset there is no sensible "already gone" default
    /// for a targeted removal a caller asked for by name.
    pub fn remove_tool(&self, name: &ToolName) -> Result<(), EngineError> {
        self.catalog
            .remove_tool(name, &self.locales)
            .map_err(EngineError::from)
    }

    /// Feed incremental text into a session's buffer (e.g. the latest
    /// keystroke) and return ranked suggestions for the buffer so far. The
    /// trailing token is treated as a possibly-partial word.
    #[tracing::instrument(level = "debug", skip(self, text), fields(session = %session))]
    pub fn feed(&self, session: &SessionId, text: &str) -> Vec<Suggestion> {
        let buffer = self.sessions.append(session, text);
        self.rank_buffer(&buffer, true)
    }

    /// Replace a session's buffer with a complete, finalized piece of text
    /// and return ranked suggestions. No token is treated as partial.
    #[tracing::instrument(level = "debug", skip(self, text), fields(session = %session))]
    pub fn submit(&self, session: &SessionId, text: &str) -> Vec<Suggestion> {
        let buffer = self.sessions.replace(session, text);
        self.rank_buffer(&buffer, false)
    }

    /// Clear a session's buffer. Resetting an unknown session is a no-op.
    pub fn reset(&self, session: &SessionId) {
        self.sessions.remove(session);
    }

    /// Rank a session's current buffer as complete, finalized text, without
    /// appending or replacing anything. Useful when the caller has already
    /// streamed the text in via repeated `feed` calls and now wants the
    /// non-streaming ranking (no trailing partial-word treatment) of what's
    /// accumulated so far.
    pub fn finalize(&self, session: &SessionId) -> Vec<Suggestion> {
        let buffer = self.sessions.get(session).unwrap_or_default();
        self.rank_buffer(&buffer, false)
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            tool_count: self.catalog.tool_count(),
            term_count: self.catalog.term_count(),
            session_count: self.sessions.session_count(),
        }
    }

    fn rank_buffer(&self, buffer: &str, streaming: bool) -> Vec<Suggestion> {
        if buffer.trim().chars().count() < 2 {
            return Vec::new();
        }

        let tokens = tokenize(buffer, &self.locales, streaming);
        if tokens.is_empty() {
            return Vec::new();
        }

        let segmenter = IntentSegmenter::new(self.config.max_intents);
        let windows = segmenter.segment(&tokens, &self.locales);
        if windows.is_empty() {
            return Vec::new();
        }

        let view = self.catalog.read();
        let ranker = Ranker::new(view.index(), view.trie());

        let last_window = windows.len() - 1;
        let per_window: Vec<Vec<RankedTool>> = windows
            .iter()
            .enumerate()
            .map(|(i, window)| {
                let is_prefix = streaming && i == last_window;
                ranker.rank(window, is_prefix, self.config.min_score, self.config.top_k)
            })
            .collect();

        let merged = if per_window.len() == 1 {
            per_window.into_iter().next().unwrap_or_default()
        } else {
            combine(per_window, self.combine_strategy, self.config.top_k)
        };

        merged
            .into_iter()
            .filter_map(|ranked| {
                view.spec(&ranked.tool)
                    .map(|spec| to_suggestion(spec, ranked.score, ranked.reason))
            })
            .collect()
    }
}

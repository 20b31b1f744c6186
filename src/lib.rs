#![warn(unreachable_pub)]
#![warn(dead_code)]

pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod search;
pub mod session;
pub mod types;
pub mod wire;

pub use catalog::{Catalog, Suggestion, ToolSpec};
pub use engine::{EngineConfig, EngineStats, SuggestionEngine};
pub use error::{CatalogError, ConfigError, EngineError, Result};
pub use types::{Locale, LocaleSet, SessionId, ToolName};

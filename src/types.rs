//! Domain-specific identity types.
//!
//! Strongly-typed alternatives to raw strings for catalog identity
//! (`ToolName`) and session identity (`SessionId`), plus the `Locale`/
//! `LocaleSet` types used to select stopword and separator sets.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A validated, non-empty tool identifier.
///
/// Tool names double as catalog key and default display label. Equality and
/// hashing are on the raw string — unlike crate names, tool names have no
/// hyphen/underscore normalization rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolName(String);

impl ToolName {
    pub fn new(name: impl Into<String>) -> Result<Self, ToolNameError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolNameError::Empty);
        }
        Ok(Self(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reserved-prefix naming convention used for display only; never
    /// affects matching or storage.
    pub fn kind(&self) -> &'static str {
        const MCP_PREFIXES: &[&str] = &["db.", "api.", "mcp.", "filesystem."];
        if MCP_PREFIXES.iter().any(|p| self.0.starts_with(p)) {
            "mcp"
        } else {
            "tool"
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ToolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ToolName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ToolName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for ToolName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ToolName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ToolName::new(s).map_err(serde::de::Error::custom)
    }
}

/// Error type for invalid tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ToolNameError {
    #[error("tool name cannot be empty")]
    Empty,
}

/// An opaque, non-empty session identifier.
///
/// Sessions are created lazily on first `feed`/`submit`. The type exists so
/// call sites can't accidentally pass a tool name where a session id was
/// meant, or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Result<Self, SessionIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SessionIdError::Empty);
        }
        Ok(Self(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Error type for invalid session identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    #[error("session id cannot be empty")]
    Empty,
}

/// A single locale a stopword/separator set is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    English,
    Portuguese,
}

impl Locale {
    fn parse_one(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "pt" | "pt-br" | "pt_br" | "portuguese" => Some(Self::Portuguese),
            _ => None,
        }
    }
}

/// The set of locales active for one engine, unioned when selecting
/// stopwords/separators — a locale hint only ever expands matching, never
/// excludes it (spec: "hints for the tokenizer but do not exclude matching
/// in other locales").
///
/// Unrecognized locale strings are dropped rather than rejected; if every
/// string in the list is unrecognized (or the list is empty), the default
/// `["pt", "en"]` set is used instead — a config typo shouldn't be fatal to
/// engine construction (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet(Vec<Locale>);

impl LocaleSet {
    pub fn parse(values: &[String]) -> Self {
        let mut locales = Vec::new();
        for value in values {
            if let Some(locale) = Locale::parse_one(value) {
                if !locales.contains(&locale) {
                    locales.push(locale);
                }
            }
        }
        if locales.is_empty() {
            locales = vec![Locale::Portuguese, Locale::English];
        }
        Self(locales)
    }

    pub fn contains(&self, locale: Locale) -> bool {
        self.0.contains(&locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = Locale> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn tool_name_rejects_empty() {
        check!(ToolName::new("").is_err());
        check!(ToolName::new("   ").is_err());
        check!(ToolName::new("export_csv").is_ok());
    }

    #[test]
    fn tool_name_kind_detects_mcp_prefixes() {
        check!(ToolName::new("db.query").unwrap().kind() == "mcp");
        check!(ToolName::new("api.fetch").unwrap().kind() == "mcp");
        check!(ToolName::new("mcp.run").unwrap().kind() == "mcp");
        check!(ToolName::new("filesystem.read").unwrap().kind() == "mcp");
        check!(ToolName::new("export_csv").unwrap().kind() == "tool");
    }

    #[test]
    fn session_id_rejects_empty() {
        check!(SessionId::new("").is_err());
        check!(SessionId::new("sess-1").is_ok());
    }

    #[test]
    fn locale_set_parse_recognizes_known_strings() {
        let set = LocaleSet::parse(&["en".to_string()]);
        check!(set.contains(Locale::English));
        check!(!set.contains(Locale::Portuguese));
    }

    #[test]
    fn locale_set_parse_unions_multiple_locales() {
        let set = LocaleSet::parse(&["pt".to_string(), "en".to_string()]);
        check!(set.contains(Locale::English));
        check!(set.contains(Locale::Portuguese));
    }

    #[test]
    fn locale_set_parse_falls_back_to_default_when_nothing_recognized() {
        let set = LocaleSet::parse(&["klingon".to_string()]);
        check!(set.contains(Locale::English));
        check!(set.contains(Locale::Portuguese));
    }

    #[test]
    fn locale_set_parse_falls_back_to_default_when_empty() {
        let set = LocaleSet::parse(&[]);
        check!(set.contains(Locale::English));
        check!(set.contains(Locale::Portuguese));
    }
}
